use actix_web::{web, App, HttpRequest, HttpServer, HttpResponse, Result, middleware};
use actix_web::error::{InternalError, JsonPayloadError, UrlencodedError};
use actix_files::Files;
use serde::Serialize;
use tracing::{info, warn};
use crate::config::Settings;
use crate::display::{render_error_html, render_result_html};
use crate::form::{validate_workers, workers_from_form, ScheduleRequest};
use crate::schedule::{hour_label, Allocation, CoverageReport, Day, StaffingPolicy, WorkerOutcome};

/// Read-only per-server state. Every request builds its own schedule.
pub struct AppState {
    pub settings: Settings,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    days: Vec<DayView>,
    workers: Vec<WorkerOutcome>,
    understaffed_slots: usize,
    total_slots: usize,
}

#[derive(Serialize)]
pub struct DayView {
    day: Day,
    slots: Vec<SlotView>,
}

#[derive(Serialize)]
pub struct SlotView {
    time: String,
    workers: Vec<String>,
    target: u32,
    understaffed: bool,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    days: Vec<CalendarDay>,
    daily_cap: u32,
}

#[derive(Serialize)]
pub struct CalendarDay {
    day: Day,
    hours: Vec<CalendarHour>,
}

#[derive(Serialize)]
pub struct CalendarHour {
    time: String,
    target: u32,
}

fn schedule_response(allocation: &Allocation, report: &CoverageReport, settings: &Settings) -> ScheduleResponse {
    let days = Day::ALL
        .iter()
        .map(|&day| DayView {
            day,
            slots: allocation
                .grid
                .day_slots(day)
                .map(|(hour, names)| {
                    let target = settings.staffing.target(day, hour);
                    SlotView {
                        time: hour_label(hour),
                        workers: names.to_vec(),
                        target,
                        understaffed: (names.len() as u32) < target,
                    }
                })
                .collect(),
        })
        .collect();

    ScheduleResponse {
        days,
        workers: allocation.outcomes.clone(),
        understaffed_slots: report.understaffed.len(),
        total_slots: report.total_slots,
    }
}

// HTML form submission
async fn schedule_form(
    form: web::Form<Vec<(String, String)>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let workers = match workers_from_form(&form) {
        Ok(workers) => workers,
        Err(e) => {
            warn!("rejected form submission: {}", e);
            return Ok(HttpResponse::BadRequest()
                .content_type("text/html")
                .body(render_error_html(&e.to_string())));
        }
    };

    info!(workers = workers.len(), "building schedule from form");
    let settings = &state.settings;
    let allocation = settings.allocate(&workers);
    let report = CoverageReport::build(&allocation, &settings.calendar, &settings.staffing);

    Ok(HttpResponse::Ok()
        .content_type("text/html")
        .body(render_result_html(&allocation, &report)))
}

// JSON schedule endpoint
async fn api_schedule(
    req: web::Json<ScheduleRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let workers = match validate_workers(&req.workers) {
        Ok(workers) => workers,
        Err(e) => {
            warn!("rejected schedule request: {}", e);
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })));
        }
    };

    info!(workers = workers.len(), "building schedule from api request");
    let settings = &state.settings;
    let allocation = settings.allocate(&workers);
    let report = CoverageReport::build(&allocation, &settings.calendar, &settings.staffing);

    Ok(HttpResponse::Ok().json(schedule_response(&allocation, &report, settings)))
}

// Calendar and staffing targets
async fn api_calendar(state: web::Data<AppState>) -> Result<HttpResponse> {
    let settings = &state.settings;
    let days = Day::ALL
        .iter()
        .map(|&day| CalendarDay {
            day,
            hours: settings
                .calendar
                .hours(day)
                .into_iter()
                .map(|hour| CalendarHour {
                    time: hour_label(hour),
                    target: settings.staffing.target(day, hour),
                })
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(CalendarResponse {
        days,
        daily_cap: settings.daily_cap,
    }))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// Body that fails to deserialize gets the same JSON error shape as a validation failure
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("rejected schedule request body: {}", err);
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": err.to_string()
    }));
    InternalError::from_response(err, response).into()
}

fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    warn!("rejected form body: {}", err);
    let response = HttpResponse::BadRequest()
        .content_type("text/html")
        .body(render_error_html(&err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Registers every route except static files
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .route("/", web::get().to(index))
        .route("/schedule", web::post().to(schedule_form))
        .route("/api/schedule", web::post().to(api_schedule))
        .route("/api/calendar", web::get().to(api_calendar));
}

pub async fn start_server(bind: &str, port: u16, settings: Settings) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { settings });

    info!("listening on http://{}:{}", bind, port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}
