pub mod api_service;
pub mod config;
pub mod controller;
pub mod error;
pub mod file_picker;
pub mod models;
pub mod state;

pub use api_service::ApiService;
pub use config::ClientConfig;
pub use controller::Controller;
pub use error::{ClientError, Operation, ValidationError};
pub use file_picker::SelectedFile;
pub use models::*;
pub use state::{Control, Controls, UiState};
