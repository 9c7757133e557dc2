use csv::StringRecord;

use crate::data::models::{Coordinate, CoordinateMap, CoordinateRecord};
use crate::error::ApiError;

const POINT: &str = "Point";
const LATITUDE: &str = "Latitude";
const LONGITUDE: &str = "Longitude";

const WRONG_COLUMNS: &str =
    "Wrong column names in file, please verify that they are Point, Latitude, and Longitude";

#[derive(Debug)]
pub struct ParsedCoordinates {
    /// Rows in file order
    pub records: Vec<CoordinateRecord>,
    pub map: CoordinateMap,
}

struct Columns {
    point: usize,
    latitude: usize,
    longitude: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Columns, ApiError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| ApiError::BadRequest(WRONG_COLUMNS.into()))
        };
        Ok(Columns {
            point: find(POINT)?,
            latitude: find(LATITUDE)?,
            longitude: find(LONGITUDE)?,
        })
    }
}

pub fn parse_coordinates(bytes: &[u8]) -> Result<ParsedCoordinates, ApiError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| ApiError::BadRequest("File is not valid UTF-8".into()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::locate(reader.headers()?)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(read_record(&row, &columns)?);
    }

    let mut map = CoordinateMap::with_capacity(records.len());
    for record in &records {
        if map.insert(&record.point, record.coordinate).is_some() {
            return Err(ApiError::BadRequest(
                format!("Duplicate point name '{}' in file", record.point)
            ));
        }
    }

    Ok(ParsedCoordinates { records, map })
}

fn read_record(row: &StringRecord, columns: &Columns) -> Result<CoordinateRecord, ApiError> {
    let field = |idx: usize| {
        row.get(idx)
            .map(str::trim)
            .ok_or_else(|| ApiError::BadRequest(WRONG_COLUMNS.into()))
    };

    let point = field(columns.point)?.to_owned();
    let latitude = parse_degrees(&point, LATITUDE, field(columns.latitude)?, 90.0)?;
    let longitude = parse_degrees(&point, LONGITUDE, field(columns.longitude)?, 180.0)?;

    Ok(CoordinateRecord { point, coordinate: Coordinate { latitude, longitude } })
}

fn parse_degrees(point: &str, column: &str, value: &str, limit: f64) -> Result<f64, ApiError> {
    let invalid = || ApiError::BadRequest(
        format!("Invalid {} '{}' for point '{}'", column, value, point)
    );

    let degrees = value.parse::<f64>().map_err(|_| invalid())?;
    if !degrees.is_finite() || degrees.abs() > limit {
        return Err(invalid());
    }
    Ok(degrees)
}

#[cfg(test)]
mod tests {
    use super::parse_coordinates;
    use crate::error::ApiError;

    fn expect_bad_request(input: &str) -> String {
        match parse_coordinates(input.as_bytes()) {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_in_file_order() {
        let parsed = parse_coordinates(
            b"Point,Latitude,Longitude\nB,40.1,-73.1\nA,40.0,-73.0\nC,-33.8688,151.2093\n"
        ).unwrap();

        let labels: Vec<&str> = parsed.records.iter().map(|r| r.point.as_str()).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);

        let map_labels: Vec<&str> = parsed.map.iter().map(|(label, _)| label).collect();
        assert_eq!(map_labels, labels);

        let c = parsed.map.get("C").unwrap();
        assert_eq!(c.latitude, -33.8688);
        assert_eq!(c.longitude, 151.2093);
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let parsed = parse_coordinates(
            b"Longitude,Notes,Point,Latitude\n-73.0,home,A,40.0\n-73.1,,B,40.1\n"
        ).unwrap();

        assert_eq!(parsed.records.len(), 2);
        let a = parsed.map.get("A").unwrap();
        assert_eq!(a.latitude, 40.0);
        assert_eq!(a.longitude, -73.0);
    }

    #[test]
    fn test_header_only_is_empty() {
        let parsed = parse_coordinates(b"Point,Latitude,Longitude\n").unwrap();
        assert!(parsed.records.is_empty());
        assert!(parsed.map.is_empty());
    }

    #[test]
    fn test_empty_file_fails_column_check() {
        let msg = expect_bad_request("");
        assert!(msg.starts_with("Wrong column names"));
    }

    #[test]
    fn test_wrong_column_name() {
        let msg = expect_bad_request("Point,Lat,Longitude\nA,40.0,-73.0\n");
        assert!(msg.contains("Point, Latitude, and Longitude"));
    }

    #[test]
    fn test_short_row() {
        let msg = expect_bad_request("Point,Latitude,Longitude\nA,40.0\n");
        assert!(msg.starts_with("Wrong column names"));
    }

    #[test]
    fn test_quoted_newline_is_data() {
        let parsed = parse_coordinates(
            b"Point,Latitude,Longitude\r\n\"North\nGate\",40.0,-73.0\r\n"
        ).unwrap();
        assert_eq!(parsed.records[0].point, "North\nGate");
    }

    #[test]
    fn test_invalid_numbers() {
        let msg = expect_bad_request("Point,Latitude,Longitude\nA,north,-73.0\n");
        assert_eq!(msg, "Invalid Latitude 'north' for point 'A'");

        let msg = expect_bad_request("Point,Latitude,Longitude\nA,91.0,-73.0\n");
        assert_eq!(msg, "Invalid Latitude '91.0' for point 'A'");

        let msg = expect_bad_request("Point,Latitude,Longitude\nA,40.0,NaN\n");
        assert_eq!(msg, "Invalid Longitude 'NaN' for point 'A'");
    }

    #[test]
    fn test_duplicate_points() {
        let msg = expect_bad_request("Point,Latitude,Longitude\nA,40.0,-73.0\nA,41.0,-74.0\n");
        assert_eq!(msg, "Duplicate point name 'A' in file");
    }

    #[test]
    fn test_invalid_utf8() {
        match parse_coordinates(b"Point,Latitude,Longitude\n\xff,1,2\n") {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "File is not valid UTF-8"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
