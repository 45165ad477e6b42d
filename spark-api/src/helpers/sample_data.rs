//! Fixed sample content: the seeded customer directory and the page data
//! shown on the dashboard, analytics and calendar views.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use shared_types::{
    ActivityAction, AnalyticsResponse, CalendarEvent, CalendarEventType, ChartPoint, Customer,
    CustomerActivity, CustomerNote, CustomerStatus, DashboardResponse, LeadSource, StatCard, Task,
    TaskPriority, TaskStatus, TeamActivity, TeamMember, Trend, WeeklyActivity,
};

use crate::database::{activities, customers, notes, now_millis, AsyncDbConnection};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

struct SampleCustomer {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    company: &'static str,
    status: CustomerStatus,
    last_contact_days_ago: Option<i64>,
    initials: &'static str,
}

const SAMPLE_CUSTOMERS: [SampleCustomer; 8] = [
    SampleCustomer { id: "1", name: "Jane Cooper", email: "jane.cooper@example.com", phone: "+1 (555) 123-4567", company: "Acme Inc.", status: CustomerStatus::Active, last_contact_days_ago: Some(2), initials: "JC" },
    SampleCustomer { id: "2", name: "Robert Fox", email: "robert.fox@example.com", phone: "+1 (555) 234-5678", company: "Global Tech", status: CustomerStatus::Lead, last_contact_days_ago: None, initials: "RF" },
    SampleCustomer { id: "3", name: "Esther Howard", email: "esther.howard@example.com", phone: "+1 (555) 345-6789", company: "Innovate Solutions", status: CustomerStatus::Active, last_contact_days_ago: Some(7), initials: "EH" },
    SampleCustomer { id: "4", name: "Darlene Robertson", email: "darlene.robertson@example.com", phone: "+1 (555) 456-7890", company: "Tech Dynamics", status: CustomerStatus::Inactive, last_contact_days_ago: Some(21), initials: "DR" },
    SampleCustomer { id: "5", name: "Guy Hawkins", email: "guy.hawkins@example.com", phone: "+1 (555) 567-8901", company: "Future Enterprises", status: CustomerStatus::Active, last_contact_days_ago: Some(1), initials: "GH" },
    SampleCustomer { id: "6", name: "Brooklyn Simmons", email: "brooklyn.simmons@example.com", phone: "+1 (555) 678-9012", company: "Digital Frontiers", status: CustomerStatus::Lead, last_contact_days_ago: None, initials: "BS" },
    SampleCustomer { id: "7", name: "Cameron Williamson", email: "cameron.williamson@example.com", phone: "+1 (555) 789-0123", company: "Bright Systems", status: CustomerStatus::Active, last_contact_days_ago: Some(3), initials: "CW" },
    SampleCustomer { id: "8", name: "Leslie Alexander", email: "leslie.alexander@example.com", phone: "+1 (555) 890-1234", company: "Neo Technologies", status: CustomerStatus::Inactive, last_contact_days_ago: Some(30), initials: "LA" },
];

fn date_millis(year: i32, month: u32, day: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Insert the sample directory plus the first customer's notes and activity log.
/// Returns the number of customers written.
pub async fn seed_sample_data(conn: AsyncDbConnection) -> Result<usize> {
    let now = now_millis();

    for (index, sample) in SAMPLE_CUSTOMERS.iter().enumerate() {
        let customer = Customer {
            id: sample.id.to_string(),
            name: sample.name.to_string(),
            email: sample.email.to_string(),
            phone: Some(sample.phone.to_string()),
            company: Some(sample.company.to_string()),
            status: sample.status,
            last_contact_at: sample.last_contact_days_ago.map(|days| now - days * DAY_MILLIS),
            initials: sample.initials.to_string(),
            avatar_url: None,
            // Keeps the listing in sample order
            created_at: now - index as i64,
        };
        customers::insert_customer_row(conn.clone(), &customer).await?;
    }

    let sample_notes = [
        ("Initial meeting about new project requirements.", date_millis(2025, 3, 28)),
        ("Follow-up call to discuss pricing and timeline.", date_millis(2025, 4, 2)),
    ];
    for (index, (content, created_at)) in sample_notes.iter().enumerate() {
        let note = CustomerNote {
            id: format!("seed-note-{}", index + 1),
            customer_id: "1".to_string(),
            content: content.to_string(),
            created_at: *created_at,
        };
        notes::insert_note_row(conn.clone(), &note).await?;
    }

    let sample_activities = [
        (ActivityAction::Email, "Sent proposal for new project", date_millis(2025, 4, 3)),
        (ActivityAction::Call, "Discussed contract terms", date_millis(2025, 3, 30)),
        (ActivityAction::Meeting, "Initial consultation", date_millis(2025, 3, 28)),
    ];
    for (index, (action, description, created_at)) in sample_activities.iter().enumerate() {
        let activity = CustomerActivity {
            id: format!("seed-activity-{}", index + 1),
            customer_id: "1".to_string(),
            action: *action,
            description: description.to_string(),
            created_at: *created_at,
        };
        activities::insert_activity_row(conn.clone(), &activity).await?;
    }

    Ok(SAMPLE_CUSTOMERS.len())
}

fn point(name: &str, value: u32) -> ChartPoint {
    ChartPoint {
        name: name.to_string(),
        value,
    }
}

fn stat(title: &str, value: &str, description: Option<&str>, trend: u32, is_positive: bool) -> StatCard {
    StatCard {
        title: title.to_string(),
        value: value.to_string(),
        description: description.map(str::to_string),
        trend: Some(Trend {
            value: trend,
            is_positive,
        }),
    }
}

fn team_activity(id: &str, name: &str, initials: &str, action: &str, target: &str, date: &str) -> TeamActivity {
    TeamActivity {
        id: id.to_string(),
        user: TeamMember {
            name: name.to_string(),
            initials: initials.to_string(),
        },
        action: action.to_string(),
        target: target.to_string(),
        date: date.to_string(),
    }
}

fn task(id: &str, title: &str, due_date: &str, priority: TaskPriority, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        due_date: due_date.to_string(),
        priority,
        status,
    }
}

pub fn dashboard() -> DashboardResponse {
    let growth = [120, 140, 130, 170, 220, 250, 290, 310, 350, 370, 390, 410];
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

    DashboardResponse {
        stats: vec![
            stat("Total Customers", "412", None, 12, true),
            stat("Active Deals", "27", Some("$342,500 total value"), 5, true),
            stat("Monthly Revenue", "$86,400", None, 2, false),
            stat("Conversion Rate", "24.8%", None, 3, true),
        ],
        customer_growth: months
            .iter()
            .zip(growth)
            .map(|(month, value)| point(month, value))
            .collect(),
        recent_activities: vec![
            team_activity("1", "John Doe", "JD", "closed a deal with", "Acme Inc.", "2 hours ago"),
            team_activity("2", "Sarah Chen", "SC", "scheduled a meeting with", "Tech Solutions", "5 hours ago"),
            team_activity("3", "Alex Johnson", "AJ", "added a new lead", "Global Enterprises", "Yesterday"),
            team_activity("4", "Maria Garcia", "MG", "sent a proposal to", "Digital Innovators", "Yesterday"),
        ],
        upcoming_tasks: vec![
            task("1", "Follow up with Tech Solutions", "Today, 3:00 PM", TaskPriority::High, TaskStatus::Pending),
            task("2", "Prepare proposal for New Horizons", "Tomorrow, 12:00 PM", TaskPriority::Medium, TaskStatus::InProgress),
            task("3", "Send contract to Acme Inc.", "May 5, 2025", TaskPriority::Medium, TaskStatus::Pending),
            task("4", "Client onboarding: Global Enterprises", "May 7, 2025", TaskPriority::Low, TaskStatus::Completed),
        ],
        insights: vec![
            "Leads from social media have a 35% higher conversion rate than other sources.".to_string(),
            "Customers in the technology sector have the shortest sales cycle (avg. 14 days).".to_string(),
            "Your follow-up response time has improved by 28%, leading to 15% more closed deals.".to_string(),
        ],
    }
}

pub fn analytics() -> AnalyticsResponse {
    let lead_sources = [
        ("Website", 30, "#8B5CF6"),
        ("Referral", 25, "#6366F1"),
        ("Social", 20, "#4F46E5"),
        ("Email", 15, "#4338CA"),
        ("Other", 10, "#3730A3"),
    ];
    let weekly = [
        ("Mon", 5, 8, 12),
        ("Tue", 7, 6, 15),
        ("Wed", 3, 7, 10),
        ("Thu", 6, 9, 13),
        ("Fri", 8, 5, 11),
    ];

    AnalyticsResponse {
        monthly_sales: vec![
            point("Jan", 25000),
            point("Feb", 32000),
            point("Mar", 35000),
            point("Apr", 30000),
            point("May", 40000),
            point("Jun", 42000),
        ],
        lead_sources: lead_sources
            .iter()
            .map(|(name, value, color)| LeadSource {
                name: name.to_string(),
                value: *value,
                color: color.to_string(),
            })
            .collect(),
        weekly_activity: weekly
            .iter()
            .map(|(name, meetings, calls, emails)| WeeklyActivity {
                name: name.to_string(),
                meetings: *meetings,
                calls: *calls,
                emails: *emails,
            })
            .collect(),
    }
}

const CALENDAR_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn event(id: &str, title: &str, starts_at: &str, duration: &str, event_type: CalendarEventType) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        starts_at: starts_at.to_string(),
        duration: duration.to_string(),
        event_type,
    }
}

pub fn calendar_events() -> Vec<CalendarEvent> {
    vec![
        event("1", "Meeting with Tech Solutions", "2025-04-05T10:30:00", "1 hour", CalendarEventType::Meeting),
        event("2", "Follow-up call with Jane Cooper", "2025-04-05T14:00:00", "30 minutes", CalendarEventType::Call),
        event("3", "Product demo for Global Enterprises", "2025-04-06T11:00:00", "1 hour", CalendarEventType::Demo),
        event("4", "Proposal review with team", "2025-04-07T09:00:00", "45 minutes", CalendarEventType::Internal),
    ]
}

/// Events starting on the given calendar day
pub fn events_on(date: NaiveDate) -> Vec<CalendarEvent> {
    calendar_events()
        .into_iter()
        .filter(|event| {
            NaiveDateTime::parse_from_str(&event.starts_at, CALENDAR_FORMAT)
                .map(|starts_at| starts_at.date() == date)
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::temp_database;

    #[tokio::test]
    async fn test_seed_writes_directory_notes_and_activities() {
        let (db, _dir) = temp_database();
        let conn = db.async_connection.clone();

        assert_eq!(seed_sample_data(conn.clone()).await.unwrap(), 8);

        let listed = customers::list_customers(conn.clone()).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert!(listed[1].last_contact_at.is_none());

        let jane_notes = notes::list_notes(conn.clone(), "1").await.unwrap();
        assert_eq!(jane_notes.len(), 2);
        assert!(jane_notes[0].content.starts_with("Follow-up call"));

        let jane_activities = activities::list_activities(conn, "1").await.unwrap();
        let actions: Vec<_> = jane_activities.iter().map(|a| a.action).collect();
        assert_eq!(
            actions,
            vec![ActivityAction::Email, ActivityAction::Call, ActivityAction::Meeting]
        );
    }

    #[test]
    fn test_events_on_filters_by_day() {
        let april_fifth = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        let titles: Vec<_> = events_on(april_fifth).into_iter().map(|e| e.id).collect();
        assert_eq!(titles, vec!["1", "2"]);

        let empty_day = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        assert!(events_on(empty_day).is_empty());
    }

    #[test]
    fn test_dashboard_shapes() {
        let dashboard = dashboard();
        assert_eq!(dashboard.stats.len(), 4);
        assert_eq!(dashboard.customer_growth.len(), 12);
        assert_eq!(dashboard.customer_growth[11].value, 410);
        assert_eq!(dashboard.upcoming_tasks[1].status, TaskStatus::InProgress);
    }
}
