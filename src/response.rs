use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub total: Option<i64>,
    pub pages: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, size: i64, total: i64) -> Self {
        let pages = if total > 0 { (total + size - 1) / size } else { 0 };
        Self {
            page: Some(page),
            size: Some(size),
            total: Some(total),
            pages: Some(pages),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            size: None,
            total: None,
            pages: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_round_up() {
        assert_eq!(Meta::new(3, 10, 25).pages, Some(3));
        assert_eq!(Meta::new(1, 10, 30).pages, Some(3));
        assert_eq!(Meta::new(1, 10, 0).pages, Some(0));
        assert_eq!(Meta::new(1, 10, 1).pages, Some(1));
    }
}
