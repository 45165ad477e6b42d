pub mod email_provider;
