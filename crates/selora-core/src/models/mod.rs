pub mod assessment_type;
pub mod result;
pub mod scoring;
pub mod session;
pub mod validation;
