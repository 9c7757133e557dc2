use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use bytes::BytesMut;
use futures::StreamExt;
use log::{error, warn};

use crate::data::models::DistanceReport;
use crate::data::pipeline::Pipeline;
use crate::data::validate::FileHeader;
use crate::error::ApiError;

const FILE_FIELD: &str = "file";

pub async fn calculate_distances(
    payload: Multipart,
    pipeline: web::Data<Pipeline>
) -> Result<HttpResponse, ApiError> {
    let result = handle_upload(payload, &pipeline).await;

    match result {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(err) => {
            match &err {
                ApiError::UpstreamStatus(_)
                | ApiError::BadGateway(_)
                | ApiError::Unreachable(_) => {
                    error!("Error while calculating distances: {}", err);
                },
                _ => warn!("Rejected upload: {}", err),
            }
            Err(err)
        },
    }
}

async fn handle_upload(
    mut payload: Multipart,
    pipeline: &Pipeline
) -> Result<DistanceReport, ApiError> {
    while let Some(field) = payload.next().await {
        let mut field = field?;
        if field.content_disposition().get_name() != Some(FILE_FIELD) {
            drain(&mut field).await?;
            continue;
        }

        let header = FileHeader {
            file_name: field
                .content_disposition()
                .get_filename()
                .unwrap_or_default()
                .to_owned(),
        };
        pipeline.check_upload(Some(&header))?;

        let content = read_field(&mut field).await?;
        return pipeline.run(&content).await;
    }

    pipeline.check_upload(None)?;
    // check_upload never accepts a missing file
    Err(ApiError::BadRequest("Missing file from request".into()))
}

async fn read_field(field: &mut Field) -> Result<BytesMut, ApiError> {
    let mut content = BytesMut::new();
    while let Some(chunk) = field.next().await {
        content.extend_from_slice(&chunk?);
    }
    Ok(content)
}

async fn drain(field: &mut Field) -> Result<(), ApiError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}
