use serde::Deserialize;

#[derive(Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

#[derive(Deserialize)]
pub struct DemoModeRequest {
    pub enabled: bool,
}
