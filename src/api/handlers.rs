//! HTTP handlers for the two pipelines.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::analyze::{BiomarkerResult, ReportMetadata, Sex, analyze_report};
use crate::error::MedReportError;
use crate::extract::{DocumentKind, ExtractionMethod};

/// JSON error payload with an HTTP status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<MedReportError> for ApiError {
    fn from(err: MedReportError) -> Self {
        let status = match err {
            MedReportError::NoSymptoms
            | MedReportError::UnknownSymptom(_)
            | MedReportError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            MedReportError::MissingBinary(_) => StatusCode::SERVICE_UNAVAILABLE,
            MedReportError::Extraction(_)
            | MedReportError::Decryption(_)
            | MedReportError::Ocr(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MedReportError::Io(_) | MedReportError::Model(_) | MedReportError::Artifact(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
        }

        if self.status.is_server_error() {
            warn!("Request failed: {}", self.message);
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Health check
pub async fn get_health() -> impl IntoResponse {
    #[derive(Serialize)]
    struct Health {
        status: &'static str,
        version: &'static str,
    }

    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// The embedded demo page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

#[derive(Serialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}

/// The ordered symptom vocabulary for the multi-select
pub async fn list_symptoms(State(state): State<AppState>) -> Json<SymptomsResponse> {
    Json(SymptomsResponse {
        symptoms: state.model.symptoms().to_vec(),
    })
}

#[derive(Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<String>,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub condition: String,
}

/// Predict a condition from selected symptoms
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let condition = state.model.predict(&request.symptoms)?;
    info!(
        "Predicted {condition:?} from {} symptoms",
        request.symptoms.len()
    );
    Ok(Json(PredictResponse { condition }))
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub metadata: ReportMetadata,
    pub sex_used: Sex,
    pub method: ExtractionMethod,
    pub text_len: usize,
    pub results: Vec<BiomarkerResult>,
}

/// Analyze an uploaded lab report
///
/// Multipart fields: `report` (the PDF/PNG/JPEG file, required) and `sex`
/// (`male`/`female`, optional override of the detected sex).
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;
    let mut sex_override: Option<Sex> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("report") => {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("could not read upload: {e}")))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            Some("sex") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("could not read field: {e}")))?;
                sex_override = Some(
                    Sex::parse(&value)
                        .ok_or_else(|| ApiError::bad_request(format!("unknown sex: {value}")))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, bytes) = upload.ok_or_else(|| ApiError::bad_request("missing report file"))?;
    let extractor = state.extractor.clone().ok_or_else(|| {
        ApiError::from(MedReportError::MissingBinary(
            "pdftotext/pdftoppm/tesseract".to_string(),
        ))
    })?;

    let kind = DocumentKind::detect(file_name.as_deref(), &bytes)?;
    let document = tokio::task::spawn_blocking(move || extractor.extract(&bytes, kind))
        .await
        .map_err(|e| ApiError::internal(format!("analysis task failed: {e}")))??;

    info!(
        "Extracted {} chars from {} page(s) via {:?}",
        document.text.len(),
        document.page_count,
        document.method
    );

    let analysis = analyze_report(&document.text, sex_override);
    Ok(Json(AnalyzeResponse {
        metadata: analysis.metadata,
        sex_used: analysis.sex_used,
        method: document.method,
        text_len: document.text.len(),
        results: analysis.results,
    }))
}
