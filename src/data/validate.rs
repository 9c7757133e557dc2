use crate::error::ApiError;

const CSV_EXTENSION: &str = "csv";

/// What the request tells us about the uploaded file before its body is read
#[derive(Debug, Clone)]
pub struct FileHeader {
    pub file_name: String,
}

/// Rejects the request before any parsing or network work.
/// The credential is checked first since nothing else matters without it.
pub fn check_upload(api_key: Option<&str>, file: Option<&FileHeader>) -> Result<(), ApiError> {
    if api_key.map_or(true, |key| key.is_empty()) {
        return Err(ApiError::Configuration(
            "Missing API KEY, please configure the API_KEY environment variable".into()
        ));
    }

    let file = file.ok_or_else(|| ApiError::BadRequest("Missing file from request".into()))?;

    if file.file_name.is_empty() {
        return Err(ApiError::BadRequest("Empty file name from request".into()));
    }

    if extension(&file.file_name) != Some(CSV_EXTENSION) {
        return Err(ApiError::BadRequest("Wrong file extension".into()));
    }

    Ok(())
}

/// Text after the last `.` of the final path component, leading dots excluded.
/// A trailing separator leaves an empty component, hence no extension.
fn extension(file_name: &str) -> Option<&str> {
    let base = file_name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file_name);
    base.trim_start_matches('.')
        .rsplit_once('.')
        .map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::{check_upload, extension, FileHeader};
    use crate::error::ApiError;

    fn header(name: &str) -> FileHeader {
        FileHeader { file_name: name.to_string() }
    }

    #[test]
    fn test_missing_key_checked_first() {
        for file in &[None, Some(header("points.csv")), Some(header("points.txt"))] {
            match check_upload(None, file.as_ref()) {
                Err(ApiError::Configuration(_)) => {},
                other => panic!("unexpected result: {:?}", other),
            }
        }
        match check_upload(Some(""), Some(&header("points.csv"))) {
            Err(ApiError::Configuration(_)) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        match check_upload(Some("key"), None) {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Missing file from request"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_name() {
        match check_upload(Some("key"), Some(&header(""))) {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Empty file name from request"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_extension_of_raw_name() {
        assert_eq!(extension("points.csv"), Some("csv"));
        assert_eq!(extension("a.b.csv"), Some("csv"));
        assert_eq!(extension("..csv"), None);
        assert_eq!(extension("points.csv/"), None);
        assert_eq!(extension("points"), None);
    }

    #[test]
    fn test_extension() {
        assert!(check_upload(Some("key"), Some(&header("points.csv"))).is_ok());
        assert!(check_upload(Some("key"), Some(&header("dir/archive.tar.csv"))).is_ok());

        for name in &["points.txt", "points.CSV", "points", ".csv", "points.csv.bak", "points.csv/", "dir.csv/points"] {
            match check_upload(Some("key"), Some(&header(name))) {
                Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Wrong file extension"),
                other => panic!("unexpected result for {}: {:?}", name, other),
            }
        }
    }
}
