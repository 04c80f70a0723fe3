/// Latest outcome of a user flow, stored in that flow's compute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OperationResult<E> {
    /// Nothing attempted yet (or the dialog was reset).
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(E),
}

impl<E> OperationResult<E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Idle | Self::Pending | Self::Succeeded => None,
        }
    }
}

impl<E, T> From<Result<T, E>> for OperationResult<E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(err) => Self::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_variant() {
        let idle: OperationResult<String> = OperationResult::default();
        assert_eq!(idle, OperationResult::Idle);
        assert!(!idle.is_pending());
        assert_eq!(idle.error(), None);

        let failed: OperationResult<String> = Err::<(), _>("boom".to_owned()).into();
        assert_eq!(failed.error().map(String::as_str), Some("boom"));

        let done: OperationResult<String> = Ok::<_, String>(3).into();
        assert!(done.is_succeeded());
    }
}
