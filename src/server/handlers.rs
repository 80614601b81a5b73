//! Axum handlers

use crate::errors::TriageError;
use crate::intake::{mime_from_extension, IntakeRecord, MAX_AGE};
use crate::models::ImageAttachment;
use crate::report::{render_error_html, render_report_html, ReferralSlip, REFERRAL_FILE_NAME};
use crate::server::page::render_page;
use crate::server::AppState;
use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

/// GET / - blank intake form
pub async fn form(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.config.report, &IntakeRecord::default(), ""))
}

/// POST /assess - run one assessment and render the result next to the form
pub async fn assess(State(state): State<AppState>, multipart: Multipart) -> Response {
    let record = match read_intake(multipart).await {
        Ok(record) => record,
        Err((partial, e)) => {
            tracing::info!(reason = %e, "form rejected");
            let page = render_page(
                &state.config.report,
                &partial,
                &render_error_html(&e.to_string()),
            );
            return (status_for(&e), Html(page)).into_response();
        }
    };

    match state.service.assess(&record).await {
        Ok(result) => {
            let report = render_report_html(&result, &state.config.render_options());
            Html(render_page(&state.config.report, &record, &report)).into_response()
        }
        Err(e) => {
            let message = match &e {
                TriageError::ModelUnavailable(_) => format!("API Error: {}", e),
                _ => e.to_string(),
            };
            let page = render_page(&state.config.report, &record, &render_error_html(&message));
            (status_for(&e), Html(page)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReferralQuery {
    pub age: u32,
}

/// GET /referral?age=N - plain-text referral slip as a download
pub async fn referral(Query(query): Query<ReferralQuery>) -> Response {
    if query.age > MAX_AGE {
        let err = TriageError::AgeOutOfRange {
            age: query.age,
            max: MAX_AGE,
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response();
    }

    let slip = ReferralSlip::new(query.age);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REFERRAL_FILE_NAME),
            ),
        ],
        slip.render(),
    )
        .into_response()
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

fn status_for(err: &TriageError) -> StatusCode {
    match err {
        e if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        TriageError::ModelUnavailable(_) | TriageError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        TriageError::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        TriageError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn bad_form(e: MultipartError) -> TriageError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        TriageError::UploadTooLarge(e.body_text())
    } else {
        TriageError::MalformedRequest(e.body_text())
    }
}

async fn field_text(field: Field<'_>) -> Result<String, TriageError> {
    field.text().await.map_err(bad_form)
}

/// Read the multipart form into an intake record
///
/// Unknown fields are ignored. An empty file input counts as no image.
/// Every readable field is kept even after a bad one, so the error page can
/// show the operator's input again; the first error is returned with it.
pub(crate) async fn read_intake(
    mut multipart: Multipart,
) -> Result<IntakeRecord, (IntakeRecord, TriageError)> {
    let mut record = IntakeRecord::default();
    let mut first_error = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                first_error.get_or_insert(bad_form(e));
                break;
            }
        };

        if let Err(e) = apply_field(&mut record, field).await {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err((record, e)),
        None => Ok(record),
    }
}

async fn apply_field(record: &mut IntakeRecord, field: Field<'_>) -> Result<(), TriageError> {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
        "role" => record.role = field_text(field).await?.parse()?,
        "gender" => record.gender = field_text(field).await?.parse()?,
        "language" => record.language = field_text(field).await?.parse()?,
        "age" => {
            let raw = field_text(field).await?;
            record.age = raw.trim().parse().map_err(|_| TriageError::InvalidField {
                field: "age",
                value: raw.trim().to_string(),
            })?;
        }
        "bp" => record.vitals.blood_pressure = field_text(field).await?,
        "hr" => record.vitals.heart_rate = field_text(field).await?,
        "temp" => record.vitals.temperature = field_text(field).await?,
        "symptoms" => record.symptoms = field_text(field).await?,
        "consent" => {
            let value = field_text(field).await?;
            record.consent_given = matches!(value.trim(), "on" | "true" | "yes" | "1");
        }
        "image" => record.image = read_image(field).await?,
        _ => {}
    }
    Ok(())
}

async fn read_image(field: Field<'_>) -> Result<Option<ImageAttachment>, TriageError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let declared = field.content_type().map(str::to_string);
    let data = field.bytes().await.map_err(bad_form)?;

    if data.is_empty() {
        return Ok(None);
    }

    let mime_type = match declared {
        Some(mime) if mime != "application/octet-stream" => mime,
        _ => mime_from_extension(&file_name)
            .map(str::to_string)
            .ok_or_else(|| TriageError::UnsupportedImage(file_name.clone()))?,
    };

    Ok(Some(ImageAttachment::new(mime_type, data)))
}
