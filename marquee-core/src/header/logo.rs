/// The designated header logo image and its alternate (on-dark) source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoSwap {
    src: String,
    alternate_src: Option<String>,
    original_src: Option<String>,
}

impl LogoSwap {
    pub fn new(src: impl Into<String>, alternate_src: Option<String>) -> Self {
        Self {
            src: src.into(),
            alternate_src: alternate_src.filter(|alt| !alt.trim().is_empty()),
            original_src: None,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn original_src(&self) -> Option<&str> {
        self.original_src.as_deref()
    }

    /// Show the alternate logo. The original is remembered on the first swap only.
    /// Returns whether `src` changed.
    pub fn swap(&mut self) -> bool {
        let Some(alternate) = self.alternate_src.as_ref() else {
            return false;
        };
        if self.original_src.is_none() {
            self.original_src = Some(self.src.clone());
        }
        if self.src == *alternate {
            return false;
        }
        self.src = alternate.clone();
        true
    }

    /// Put back the remembered original, if a swap ever happened.
    pub fn restore(&mut self) -> bool {
        match self.original_src.as_ref() {
            Some(original) if self.src != *original => {
                self.src = original.clone();
                true
            }
            _ => false,
        }
    }

    pub fn apply(&mut self, swap_logo: bool) -> bool {
        if swap_logo { self.swap() } else { self.restore() }
    }
}
