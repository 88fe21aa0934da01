//! WebAssembly module for the Crop Advisor
//!
//! Exposes the input/display shell to the browser. JavaScript owns the markup
//! and the `fetch` to `/api/v1/recommendations`; this module owns form state,
//! the view state machine and decoding of the API reply.

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::shell::*;
pub use shared::types::*;

/// Soil types for the select control, as a JSON array
#[wasm_bindgen(js_name = soilTypes)]
pub fn soil_types() -> String {
    let names: Vec<&str> = SoilType::ALL.iter().map(|s| s.as_str()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

/// Browser-facing wrapper around [`Shell`]
#[wasm_bindgen]
pub struct CropAdvisorShell {
    shell: Shell,
}

impl Default for CropAdvisorShell {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CropAdvisorShell {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CropAdvisorShell {
        CropAdvisorShell {
            shell: Shell::new(),
        }
    }

    /// Apply a change event from the control named `name`
    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        self.try_set_field(name, value).map_err(to_js)
    }

    #[wasm_bindgen(js_name = conditionsJson)]
    pub fn conditions_json(&self) -> String {
        serde_json::to_string(self.shell.conditions()).unwrap_or_default()
    }

    /// Start a submission. Returns `{"ticket": n, "conditions": {...}}`; the
    /// caller posts `conditions` and hands the reply back with the ticket.
    pub fn submit(&mut self) -> Result<String, JsValue> {
        self.try_submit().map_err(to_js)
    }

    /// Feed the HTTP outcome back in. Returns false for a superseded ticket.
    #[wasm_bindgen(js_name = receiveResponse)]
    pub fn receive_response(&mut self, ticket: u32, ok: bool, body: &str) -> bool {
        self.apply_response(Ticket(u64::from(ticket)), ok, body)
    }

    /// Render model of the results panel, as JSON
    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> String {
        serde_json::to_string(&self.shell.view()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.shell.is_busy()
    }
}

impl CropAdvisorShell {
    fn try_set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.shell
            .update_field_by_name(name, value)
            .map_err(|e| e.to_string())
    }

    fn try_submit(&mut self) -> Result<String, String> {
        let submission = self.shell.submit().map_err(|e| e.to_string())?;
        serde_json::to_string(&submission).map_err(|e| e.to_string())
    }

    fn apply_response(&mut self, ticket: Ticket, ok: bool, body: &str) -> bool {
        if !ok {
            let detail = match serde_json::from_str::<ErrorResponse>(body) {
                Ok(error) => format!("{}: {}", error.error.code, error.error.message),
                Err(_) => body.to_string(),
            };
            return self.fail(ticket, &detail);
        }

        match serde_json::from_str::<RecommendationResponse>(body) {
            Ok(response) => self.shell.complete_success(ticket, response.suggestions),
            Err(e) => self.fail(ticket, &format!("Unreadable response: {}", e)),
        }
    }

    fn fail(&mut self, ticket: Ticket, detail: &str) -> bool {
        log_error(detail);
        self.shell.complete_failure(ticket, detail)
    }
}

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

#[cfg(target_arch = "wasm32")]
fn log_error(detail: &str) {
    web_sys::console::error_1(&JsValue::from_str(detail));
}

#[cfg(not(target_arch = "wasm32"))]
fn log_error(_detail: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(shell: &mut CropAdvisorShell) -> Ticket {
        let json = shell.try_submit().unwrap();
        let submission: Submission = serde_json::from_str(&json).unwrap();
        submission.ticket
    }

    #[test]
    fn test_soil_types() {
        assert_eq!(
            soil_types(),
            r#"["Loamy","Clay","Sandy","Silty","Chalky","Peaty"]"#
        );
    }

    #[test]
    fn test_set_field_by_control_name() {
        let mut shell = CropAdvisorShell::new();
        shell.try_set_field("ph", "7.1").unwrap();
        shell.try_set_field("soilType", "Sandy").unwrap();

        let conditions: FarmConditions = serde_json::from_str(&shell.conditions_json()).unwrap();
        assert_eq!(conditions.ph, "7.1");
        assert_eq!(conditions.soil_type, SoilType::Sandy);
        assert_eq!(conditions.region, "Temperate");
    }

    #[test]
    fn test_unknown_control_is_rejected() {
        let mut shell = CropAdvisorShell::new();
        assert!(shell.try_set_field("humidity", "80").is_err());
    }

    #[test]
    fn test_successful_response_renders_cards() {
        let mut shell = CropAdvisorShell::new();
        let ticket = submit(&mut shell);
        assert!(shell.is_busy());

        let body = r#"{
            "requestId": "2f1d6c1e-8d8b-4a55-9b1e-0c6a3f5b9d21",
            "model": "gemini-2.5-flash",
            "suggestions": [{"cropName": "Rice", "reason": "High rainfall tolerance"}],
            "generatedAt": "2026-10-17T09:30:00Z"
        }"#;
        assert!(shell.apply_response(ticket, true, body));

        let view: serde_json::Value = serde_json::from_str(&shell.view_json()).unwrap();
        assert_eq!(view["state"], "results");
        assert_eq!(view["cards"][0]["cropName"], "Rice");
        assert!(!shell.is_busy());
    }

    #[test]
    fn test_error_response_shows_generic_message() {
        let mut shell = CropAdvisorShell::new();
        let ticket = submit(&mut shell);

        let body = r#"{"error":{"code":"RECOMMENDATION_FETCH_ERROR","message":"upstream"}}"#;
        assert!(shell.apply_response(ticket, false, body));

        let view: serde_json::Value = serde_json::from_str(&shell.view_json()).unwrap();
        assert_eq!(view["state"], "error");
        assert_eq!(view["message"], ERROR_MESSAGE);
    }

    #[test]
    fn test_garbled_success_body_is_error() {
        let mut shell = CropAdvisorShell::new();
        let ticket = submit(&mut shell);

        shell.apply_response(ticket, true, "<html>502</html>");

        let view: serde_json::Value = serde_json::from_str(&shell.view_json()).unwrap();
        assert_eq!(view["state"], "error");
    }

    #[test]
    fn test_submit_while_busy_is_refused() {
        let mut shell = CropAdvisorShell::new();
        submit(&mut shell);
        assert!(shell.try_submit().is_err());
    }
}
