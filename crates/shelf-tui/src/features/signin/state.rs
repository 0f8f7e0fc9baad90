//! Sign-in form state.

/// Which input field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInField {
    #[default]
    Email,
    Secret,
}

impl SignInField {
    pub fn next(self) -> Self {
        match self {
            SignInField::Email => SignInField::Secret,
            SignInField::Secret => SignInField::Email,
        }
    }
}

/// Sign-in form state: two text fields and the last failure, if any.
#[derive(Debug, Default)]
pub struct SignInState {
    pub email: String,
    pub secret: String,
    pub focus: SignInField,
    /// Last sign-in failure, shown inline under the fields.
    pub error: Option<String>,
    /// True between submit and the provider's answer. Display only: the
    /// submit path itself is not locked, so repeated Enter re-submits.
    pub submitting: bool,
}

impl SignInState {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            SignInField::Email => &mut self.email,
            SignInField::Secret => &mut self.secret,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }
}
