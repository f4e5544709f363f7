use std::fmt;

/// A fully assembled request, ready to be sent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    /// `HTTP/1.1` and friends, if the request line carried one.
    pub version: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: &str, url: &str) -> HttpRequest {
        HttpRequest {
            method: method.to_string(),
            url: url.to_string(),
            version: None,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets a header, replacing an earlier value under the same name in place.
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        if let Some(version) = &self.version {
            write!(f, " {}", version)?;
        }
        writeln!(f)?;
        for (name, value) in &self.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        if let Some(body) = &self.body {
            write!(f, "\n{}", body)?;
        }
        Ok(())
    }
}
