//! Upload endpoint handlers

use axum::{
    extract::Multipart,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::ValuationResult;
use crate::pipeline::{self, ValuationOutcome};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET / - the upload page
pub async fn index(markup: &'static str) -> Html<&'static str> {
    Html(markup)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /process - run the valuation pipeline on an uploaded file.
///
/// Expects a multipart form with a `file` field. Any failure comes back as
/// 400 with a plain-text reason; success streams the workbook bytes with the
/// download filename in both Content-Disposition and X-Filename.
pub async fn process(mut multipart: Multipart) -> impl IntoResponse {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Upload failed: {}", e)),
        };
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            match field.bytes().await {
                Ok(bytes) => upload = Some((filename, bytes.to_vec())),
                Err(e) => {
                    return bad_request(format!("Upload failed: {}", e));
                }
            }
            break;
        }
    }

    let Some((filename, bytes)) = upload else {
        return bad_request("No file uploaded".to_string());
    };
    if filename.is_empty() {
        return bad_request("No file selected".to_string());
    }

    match run_pipeline(&filename, &bytes) {
        Ok(outcome) => {
            info!(
                "processed '{}' -> '{}' ({} bytes)",
                filename,
                outcome.output_filename,
                outcome.workbook.len()
            );
            workbook_response(outcome)
        }
        Err(e) => {
            error!("processing '{}' failed: {}", filename, e);
            bad_request(e.to_string())
        }
    }
}

/// The synchronous pipeline core, separated so it is testable without HTTP.
fn run_pipeline(filename: &str, bytes: &[u8]) -> ValuationResult<ValuationOutcome> {
    pipeline::run_valuation(filename, bytes)
}

fn bad_request(message: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

fn workbook_response(outcome: ValuationOutcome) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );

    let disposition = format!("attachment; filename=\"{}\"", outcome.output_filename);
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    if let Ok(value) = HeaderValue::from_str(&outcome.output_filename) {
        headers.insert("X-Filename", value);
    }

    (StatusCode::OK, headers, outcome.workbook).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequest;
    use pretty_assertions::assert_eq;

    async fn multipart_from(body: &'static str) -> Multipart {
        let request = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "multipart/form-data; boundary=XYZ")
            .body(axum::body::Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    async fn response_parts(response: axum::response::Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_process_success_sets_download_headers() {
        let body = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"listing-3.csv\"\r\n\
            \r\n\
            amount,year\n100,2022\n\r\n\
            --XYZ--\r\n";
        let response = process(multipart_from(body).await).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("X-Filename").unwrap(),
            "Listing 3 Valuation.xlsx"
        );
    }

    #[tokio::test]
    async fn test_process_reports_malformed_body() {
        // No boundary anywhere, so multipart decoding itself fails
        let multipart = multipart_from("this is not a multipart payload").await;
        let (status, body) = response_parts(process(multipart).await.into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Upload failed"), "unexpected body: {}", body);
    }

    #[tokio::test]
    async fn test_process_without_file_field() {
        let (status, body) =
            response_parts(process(multipart_from("--XYZ--\r\n").await).await.into_response())
                .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No file uploaded");
    }

    #[test]
    fn test_pipeline_core_success() {
        let csv = "amount,year\n100,2022\n200,2023\n";
        let outcome = run_pipeline("listing-5.csv", csv.as_bytes()).unwrap();
        assert_eq!(outcome.output_filename, "Listing 5 Valuation.xlsx");
        assert_eq!(&outcome.workbook[..2], b"PK");
    }

    #[test]
    fn test_pipeline_core_error_text_is_user_facing() {
        let csv = "track,plays\nSong,10\n";
        let err = run_pipeline("data.csv", csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find a column for 'amount' in the input file"
        );
    }

    #[test]
    fn test_health_payload_shape() {
        let payload = HealthResponse {
            status: "healthy".to_string(),
            version: "1.0.0".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["version"], "1.0.0");
    }

    #[test]
    fn test_workbook_response_headers() {
        let csv = "amount,year\n100,2022\n";
        let outcome = run_pipeline("listing-5.csv", csv.as_bytes()).unwrap();
        let response = workbook_response(outcome);

        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            XLSX_CONTENT_TYPE
        );
        assert_eq!(
            headers.get("X-Filename").unwrap(),
            "Listing 5 Valuation.xlsx"
        );
        assert!(headers
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Listing 5 Valuation.xlsx"));
    }
}
