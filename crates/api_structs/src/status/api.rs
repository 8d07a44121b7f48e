pub mod get_service_health {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct APIResponse {
        pub message: String,
    }
}
