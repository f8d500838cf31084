//! Helpers for rendering error chains.

mod private {
    use eyre::Chain;
    use std::error::Error;

    pub trait ErrorChain {
        fn chain(&self) -> Chain<'_>;
    }

    impl ErrorChain for dyn Error + 'static {
        fn chain(&self) -> Chain<'_> {
            Chain::new(self)
        }
    }

    impl ErrorChain for dyn Error + Send + Sync + 'static {
        fn chain(&self) -> Chain<'_> {
            Chain::new(self)
        }
    }

    impl ErrorChain for eyre::Report {
        fn chain(&self) -> Chain<'_> {
            self.chain()
        }
    }
}

/// Displays a chain of errors in a single line.
pub fn display_chain<E: private::ErrorChain + ?Sized>(error: &E) -> String {
    dedup_chain(error).join("; ")
}

/// Deduplicates a chain of errors.
pub fn dedup_chain<E: private::ErrorChain + ?Sized>(error: &E) -> Vec<String> {
    let mut causes = all_sources(error);
    // `msg1: msg2; msg2` -> `msg1: msg2`
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// Returns the message of the innermost error in the chain.
pub fn root_message<E: private::ErrorChain + ?Sized>(error: &E) -> String {
    error.chain().last().map(|cause| cause.to_string().trim().to_string()).unwrap_or_default()
}

fn all_sources<E: private::ErrorChain + ?Sized>(err: &E) -> Vec<String> {
    err.chain().map(|cause| cause.to_string().trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(thiserror::Error, Debug)]
    #[error("failed to fetch record: {0}")]
    struct Outer(#[from] Inner);

    #[derive(thiserror::Error, Debug)]
    #[error("{0}")]
    struct Inner(String);

    #[test]
    fn dedups_contained() {
        let report = eyre::Report::from(Outer(Inner("execution reverted".into())));
        assert_eq!(report.chain().count(), 2, "{report:?}");
        assert_eq!(
            all_sources(&report).join("; "),
            "failed to fetch record: execution reverted; execution reverted"
        );
        assert_eq!(display_chain(&report), "failed to fetch record: execution reverted");
    }

    #[test]
    fn root_message_is_innermost() {
        let report = eyre::Report::from(Outer(Inner("  connection refused ".into())));
        assert_eq!(root_message(&report), "connection refused");
    }
}
