use std::fmt::Write as _;

/// Dotted path of the value being visited, for diagnostics
#[derive(Debug, Default, Clone)]
pub(crate) struct Breadcrumb(String);

impl Breadcrumb {
    pub(crate) fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Breadcrumb(key.to_owned())
        } else {
            Breadcrumb(format!("{}.{key}", self.0))
        }
    }

    pub(crate) fn index(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        let _ = write!(path, "[{index}]");
        Breadcrumb(path)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_rendering() {
        let path = Breadcrumb::default().key("key8").index(1).key("keyB");
        assert_eq!(path.as_str(), "key8[1].keyB");
    }
}
