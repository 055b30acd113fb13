pub mod chat;
pub mod dashboard;
pub mod footprint;
pub mod lookup;
pub mod onboarding;
pub mod profiles;
pub mod tips;
