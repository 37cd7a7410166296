//! HTTP method types for platform requests.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods used by platform resources.
///
/// ## Examples
///
/// ```rust
/// use moxiworks_platform::RestMethod;
///
/// assert!(RestMethod::Get.encodes_as_query());
/// assert!(!RestMethod::Post.encodes_as_query());
///
/// let parsed: RestMethod = "PUT".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP POST - Create a resource.
    Post,
    /// HTTP PUT - Update a resource.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
}

impl RestMethod {
    /// Returns `true` if attributes travel in the query string.
    ///
    /// Only GET does; every other method sends a form-encoded body.
    pub fn encodes_as_query(&self) -> bool {
        matches!(self, Self::Get)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Put.to_string(), "PUT");
    }

    #[test]
    fn test_parse() {
        assert_eq!("DELETE".parse::<RestMethod>().unwrap(), RestMethod::Delete);
        assert!("FETCH".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_only_get_encodes_as_query() {
        let query_methods: Vec<_> = RestMethod::iter()
            .filter(RestMethod::encodes_as_query)
            .collect();
        assert_eq!(query_methods, vec![RestMethod::Get]);
    }

    #[test]
    fn test_to_reqwest() {
        assert_eq!(RestMethod::Get.to_reqwest(), reqwest::Method::GET);
        assert_eq!(RestMethod::Patch.to_reqwest(), reqwest::Method::PATCH);
    }
}
