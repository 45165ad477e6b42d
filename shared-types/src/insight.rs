use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Insight {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InsightsResponse {
    pub customer_id: String,
    pub insights: Vec<Insight>,
}

fn insight(id: &str, text: impl Into<String>) -> Insight {
    Insight {
        id: id.to_string(),
        text: text.into(),
    }
}

/// Canned insights for a customer. Only the first three sample customers
/// have their own set; everyone else gets the default set.
pub fn canned_insights(customer_id: &str, customer_name: &str) -> Vec<Insight> {
    match customer_id {
        "1" => vec![
            insight("1", "Customer spending has increased by 18% over the past quarter."),
            insight("2", "Recent engagement suggests interest in expanding their contract."),
            insight("3", "Communication frequency is higher than average, indicating strong relationship."),
        ],
        "2" => vec![
            insight("1", "First contact was through a referral from an existing customer."),
            insight("2", "Has shown interest in premium features but concerned about pricing."),
            insight("3", "Based on profile similarities, this lead has a 62% conversion probability."),
        ],
        "3" => vec![
            insight("1", "Customer has been with us for over 2 years with consistent engagement."),
            insight("2", "Support ticket frequency has decreased by 30% since last upgrade."),
            insight("3", "Renewal date is approaching in 45 days - historical pattern shows high renewal likelihood."),
        ],
        _ => vec![
            insight(
                "1",
                format!("{customer_name} shows potential for increased engagement based on recent activity."),
            ),
            insight("2", "Our AI model suggests offering a personalized demo of new features."),
            insight("3", "Communication patterns suggest a preference for email over calls."),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_customer_has_own_set() {
        let insights = canned_insights("2", "Robert Fox");
        assert_eq!(insights.len(), 3);
        assert!(insights[2].text.contains("62%"));
    }

    #[test]
    fn test_default_set_mentions_name() {
        let insights = canned_insights("b6c1", "Guy Hawkins");
        assert_eq!(insights.len(), 3);
        assert!(insights[0].text.starts_with("Guy Hawkins shows potential"));
    }
}
