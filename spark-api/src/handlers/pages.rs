use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use shared_types::{EventsResponse, ListEventsRequest};

use crate::error::ApiError;
use crate::helpers::sample_data;

pub async fn dashboard() -> HttpResponse {
    HttpResponse::Ok().json(sample_data::dashboard())
}

pub async fn analytics() -> HttpResponse {
    HttpResponse::Ok().json(sample_data::analytics())
}

pub async fn list_events(query: web::Query<ListEventsRequest>) -> Result<HttpResponse, ApiError> {
    let events = match query.into_inner().date {
        Some(date) => {
            let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .map_err(|_| ApiError::BadRequest(format!("Invalid date: {}", date)))?;
            sample_data::events_on(day)
        }
        None => sample_data::calendar_events(),
    };

    Ok(HttpResponse::Ok().json(EventsResponse { events }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use actix_web::{http::StatusCode, test};
    use shared_types::{AnalyticsResponse, DashboardResponse, EventsResponse};

    #[actix_web::test]
    async fn test_page_data() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        let dashboard: DashboardResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dashboard.stats[0].title, "Total Customers");

        let req = test::TestRequest::get().uri("/api/analytics").to_request();
        let analytics: AnalyticsResponse = test::call_and_read_body_json(&app, req).await;
        let share: u32 = analytics.lead_sources.iter().map(|s| s.value).sum();
        assert_eq!(share, 100);
    }

    #[actix_web::test]
    async fn test_calendar_date_filter() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::get().uri("/api/calendar/events").to_request();
        let all: EventsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.events.len(), 4);

        let req = test::TestRequest::get()
            .uri("/api/calendar/events?date=2025-04-06")
            .to_request();
        let sixth: EventsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(sixth.events.len(), 1);
        assert_eq!(sixth.events[0].title, "Product demo for Global Enterprises");

        let req = test::TestRequest::get()
            .uri("/api/calendar/events?date=04/06/2025")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
