/// Any error type can combined multiple errors into one error.
pub trait CombinableError {
    fn combine(&mut self, other: Self);
}

/// Collects the items of a sequence of results, or every error of it combined into one.
pub struct ResultFlattener<T, E: CombinableError> {
    items: Vec<T>,
    errors: Option<E>
}

impl<T, E: CombinableError> Default for ResultFlattener<T, E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            errors: None,
        }
    }
}

impl<T, E: CombinableError> ResultFlattener<T, E> {
    pub fn combine(&mut self, result: Result<T, E>) {
        match result {
            Ok(item) => self.items.push(item),
            Err(err) => {
                if let Some(ref mut errors) = self.errors {
                    errors.combine(err);
                } else {
                    self.errors = Some(err);
                }
            }
        }
    }

    /// Convenient associated method to use in Rust functional programming.
    /// Such as [`Iterator::fold`].
    pub fn fold(mut folder: Self, result: Result<T, E>) -> Self {
        folder.combine(result);
        folder
    }

    /// Whether any failed result has been combined so far.
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    pub fn finish(self) -> Result<Vec<T>, E> {
        if let Some(errors) = self.errors {
            Err(errors)
        } else {
            Ok(self.items)
        }
    }
}

impl<T, E: CombinableError> FromIterator<Result<T, E>> for ResultFlattener<T, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::fold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Messages(Vec<&'static str>);

    impl CombinableError for Messages {
        fn combine(&mut self, mut other: Self) {
            self.0.append(&mut other.0);
        }
    }

    #[test]
    fn flatten_all_ok() {
        let flattener: ResultFlattener<u32, Messages> = vec![Ok(1), Ok(2), Ok(3)].into_iter().collect();
        assert_eq!(flattener.finish().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn flatten_combines_every_error() {
        let flattener: ResultFlattener<u32, Messages> = vec![
            Ok(1),
            Err(Messages(vec!["first"])),
            Ok(3),
            Err(Messages(vec!["second"])),
        ].into_iter().collect();

        assert!(flattener.has_errors());
        assert_eq!(flattener.finish().unwrap_err(), Messages(vec!["first", "second"]));
    }
}
