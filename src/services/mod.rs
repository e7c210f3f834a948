pub mod errors;
pub mod genai;
pub mod style_advisor;
