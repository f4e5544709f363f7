use std::time::Duration;

/// What came back from one executed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: String,
    /// In the order received; repeated names are kept.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// From sending the request until status and headers arrived.
    pub elapsed: Duration,
}
