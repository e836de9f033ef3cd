//! Classification of backend response statuses.
//!
//! Every read path runs the backend status through [`classify_status`] so
//! absence is reported the same way regardless of the endpoint.

/// Outcome class of a backend response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// 2xx: the body carries the result.
    Success,
    /// 404: the document (or the whole collection) does not exist.
    NotFound,
    /// Any other status.
    Failure,
}

/// Classify an HTTP status code returned by the backend.
pub fn classify_status(status: u16) -> ResponseClass {
    match status {
        200..=299 => ResponseClass::Success,
        404 => ResponseClass::NotFound,
        _ => ResponseClass::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert_eq!(classify_status(200), ResponseClass::Success);
        assert_eq!(classify_status(201), ResponseClass::Success);
        assert_eq!(classify_status(299), ResponseClass::Success);
    }

    #[test]
    fn test_not_found() {
        assert_eq!(classify_status(404), ResponseClass::NotFound);
    }

    #[test]
    fn test_failures() {
        for status in [300, 400, 401, 409, 429, 500, 503] {
            assert_eq!(classify_status(status), ResponseClass::Failure, "{status}");
        }
    }
}
