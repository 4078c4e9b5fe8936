// 🌐 HTTP API - one booking session over JSON
//
// The whole API shares a single Session behind a mutex; there is exactly one
// client per process.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;

use crate::booking::BookingStage;
use crate::entities::{Appointment, Employee, PaymentMethod, Pet, PetSize, Service, StatusTone};
use crate::error::{BookingError, CatalogError, RegistrationError};
use crate::pricing::{self, PriceQuote};
use crate::reports::{FinancialSummary, ServiceTotal};
use crate::session::Session;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        AppState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: false,
        data: None,
        error: Some(message),
    };
    (status, Json(body)).into_response()
}

fn booking_error(err: BookingError) -> Response {
    let status = match &err {
        BookingError::PetNotRegistered | BookingError::NoBookingInProgress => StatusCode::CONFLICT,
        BookingError::Catalog(CatalogError::UnknownService(_))
        | BookingError::Catalog(CatalogError::UnknownEmployee(_)) => StatusCode::NOT_FOUND,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, err.to_string())
}

// ============================================================================
// Request / Response bodies
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterPetRequest {
    pub name: String,
    pub breed: String,
    pub weight: f64,
    pub size: PetSize,
    #[serde(default)]
    pub observations: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub service_id: String,
    pub size: PetSize,
    #[serde(default)]
    pub taxi_dog: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service_id: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    pub date_time: String,
    #[serde(default)]
    pub taxi_dog: bool,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub appointment: Appointment,
    pub whatsapp_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_qr_url: Option<String>,
}

/// Appointment plus the colour its status chip is drawn in
#[derive(Debug, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub status_tone: StatusTone,
}

impl From<Appointment> for AppointmentView {
    fn from(appointment: Appointment) -> Self {
        Self {
            status_tone: appointment.status.tone(),
            appointment,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub financial: FinancialSummary,
    pub services: Vec<ServiceTotal>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/services
async fn list_services(State(state): State<AppState>) -> Json<ApiResponse<Vec<Service>>> {
    let session = state.session();
    Json(ApiResponse::ok(session.catalog().services().to_vec()))
}

/// GET /api/employees
async fn list_employees(State(state): State<AppState>) -> Json<ApiResponse<Vec<Employee>>> {
    let session = state.session();
    Json(ApiResponse::ok(session.catalog().employees().to_vec()))
}

/// POST /api/pet
async fn register_pet(
    State(state): State<AppState>,
    Json(request): Json<RegisterPetRequest>,
) -> Response {
    let mut session = state.session();

    let registered = Pet::new(&request.name, &request.breed, request.weight, request.size)
        .and_then(|pet| session.add_pet(pet.with_observations(&request.observations)).cloned());

    match registered {
        Ok(pet) => (StatusCode::CREATED, Json(ApiResponse::ok(pet))).into_response(),
        Err(err @ RegistrationError::AlreadyRegistered) => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        Err(err) => error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
    }
}

/// POST /api/quote
async fn quote(State(state): State<AppState>, Json(request): Json<QuoteRequest>) -> Response {
    let session = state.session();
    let add_on = session.settings().add_on;

    if request.taxi_dog && !add_on.enabled {
        return booking_error(BookingError::AddOnDisabled);
    }

    match session.catalog().require_service(&request.service_id) {
        Ok(service) => {
            let q: PriceQuote = pricing::quote(service, request.size, request.taxi_dog, add_on.fee);
            (StatusCode::OK, Json(ApiResponse::ok(q))).into_response()
        }
        Err(err) => booking_error(err.into()),
    }
}

/// POST /api/bookings - run the composer end to end and confirm
async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Response {
    let mut session = state.session();

    let result = (|| -> Result<Appointment, BookingError> {
        session.start_booking()?;
        session.select_service(&request.service_id)?;
        session.select_employee(request.employee_id.as_deref())?;
        {
            let booking = session.booking_mut()?;
            booking.set_date_time(&request.date_time)?;
            booking.set_taxi_dog(request.taxi_dog)?;
            if booking.stage() == BookingStage::PaymentSelection {
                booking.set_payment_method(request.payment_method)?;
            }
        }
        session.confirm_booking()
    })();

    match result {
        Ok(appointment) => {
            let whatsapp_link = session.whatsapp_link(&appointment.id);
            let pix_qr_url = match appointment.payment_method {
                PaymentMethod::Pix => Some(session.pix_qr_url()),
                PaymentMethod::OnSite => None,
            };
            let response = BookingResponse {
                appointment,
                whatsapp_link,
                pix_qr_url,
            };
            (StatusCode::CREATED, Json(ApiResponse::ok(response))).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "booking request rejected");
            booking_error(err)
        }
    }
}

/// GET /api/appointments - newest first
async fn list_appointments(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<AppointmentView>>> {
    let session = state.session();
    let views = session
        .appointments()
        .into_iter()
        .map(AppointmentView::from)
        .collect();
    Json(ApiResponse::ok(views))
}

/// GET /api/summary
async fn summary(State(state): State<AppState>) -> Json<ApiResponse<SummaryResponse>> {
    let session = state.session();
    Json(ApiResponse::ok(SummaryResponse {
        financial: session.financial_summary(),
        services: session.service_breakdown(),
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(session: Session) -> Router {
    let state = AppState::new(session);

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/services", get(list_services))
        .route("/employees", get(list_employees))
        .route("/pet", post(register_pet))
        .route("/quote", post(quote))
        .route("/bookings", post(create_booking))
        .route("/appointments", get(list_appointments))
        .route("/summary", get(summary))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
