use crate::customer::{Customer, CustomerStatus};

/// Case-insensitive substring match over name, email and company.
///
/// An empty or whitespace-only query keeps every customer. Input order is
/// preserved.
pub fn filter_customers(customers: &[Customer], query: &str) -> Vec<Customer> {
    if query.trim().is_empty() {
        return customers.to_vec();
    }

    let needle = query.to_lowercase();
    customers
        .iter()
        .filter(|customer| matches_query(customer, &needle))
        .cloned()
        .collect()
}

fn matches_query(customer: &Customer, needle: &str) -> bool {
    customer.name.to_lowercase().contains(needle)
        || customer.email.to_lowercase().contains(needle)
        || customer
            .company
            .as_deref()
            .map(|company| company.to_lowercase().contains(needle))
            .unwrap_or(false)
}

/// Status dropdown value; `None` stands for "all".
pub fn parse_status_filter(value: Option<&str>) -> Result<Option<CustomerStatus>, String> {
    match value.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(other) => CustomerStatus::parse(other)
            .map(Some)
            .ok_or_else(|| format!("Unknown status filter: {}", other)),
    }
}

pub fn filter_by_status(customers: Vec<Customer>, status: Option<CustomerStatus>) -> Vec<Customer> {
    match status {
        Some(status) => customers.into_iter().filter(|c| c.status == status).collect(),
        None => customers,
    }
}
