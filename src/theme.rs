use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub label_color: String,
    pub progress_color: String,
    pub track_color: String,
    pub canvas_background: Option<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            label_color: "#000000".to_string(),
            progress_color: "#3B82F6".to_string(),
            track_color: "#E5E7EB".to_string(),
            canvas_background: None,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            label_color: "#1C2430".to_string(),
            progress_color: "#6366F1".to_string(),
            track_color: "#EEF2F8".to_string(),
            canvas_background: None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
