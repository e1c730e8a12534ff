//! Login-scoped learner state.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use quest_core::model::Identity;

use crate::auth::{Authenticator, Credentials, IdentityStore};
use crate::deferred::ViewGeneration;
use crate::error::SessionError;
use crate::progress::ProgressStore;
use crate::Clock;

/// Everything that lives as long as one sign-in.
#[derive(Debug)]
pub struct LearnerSession {
    progress: ProgressStore,
    view: ViewGeneration,
    started_at: DateTime<Utc>,
}

impl LearnerSession {
    fn new(clock: Clock) -> Self {
        Self {
            progress: ProgressStore::new(clock),
            view: ViewGeneration::new(),
            started_at: clock.now(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    /// Generation that every view opened in this session hangs off.
    #[must_use]
    pub fn view(&self) -> &ViewGeneration {
        &self.view
    }

    /// A fresh view for a quiz, game or chat. Its deferred updates are
    /// dropped when either it is dismissed or the learner signs out.
    #[must_use]
    pub fn child_view(&self) -> ViewGeneration {
        self.view.child()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Signs learners in and out, owning their session state in between.
pub struct SessionManager {
    clock: Clock,
    identities: IdentityStore,
    active: Option<LearnerSession>,
}

impl SessionManager {
    #[must_use]
    pub fn new(clock: Clock, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            clock,
            identities: IdentityStore::new(authenticator),
            active: None,
        }
    }

    #[must_use]
    pub fn mock(clock: Clock) -> Self {
        Self {
            clock,
            identities: IdentityStore::mock(),
            active: None,
        }
    }

    /// Sign in with fresh, empty progress. Any previous session is ended first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Auth` if the credentials are rejected; the
    /// current session is left as it was.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&mut LearnerSession, SessionError> {
        let mut next = self.identities.clone();
        next.login(credentials)?;
        self.end_active();
        self.identities = next;
        Ok(self.active.insert(LearnerSession::new(self.clock)))
    }

    /// Sign out, discarding progress. Pending deferred updates go stale.
    pub fn logout(&mut self) -> Option<Identity> {
        self.end_active();
        self.identities.logout()
    }

    fn end_active(&mut self) {
        if let Some(session) = self.active.take() {
            session.view.invalidate();
            info!(
                attempts = session.progress.results().len(),
                "learner session ended"
            );
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identities.current()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identities.is_authenticated()
    }

    #[must_use]
    pub fn age_hint(&self) -> u8 {
        self.identities.age_hint()
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotSignedIn` without an active session.
    pub fn active(&self) -> Result<&LearnerSession, SessionError> {
        self.active.as_ref().ok_or(SessionError::NotSignedIn)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotSignedIn` without an active session.
    pub fn active_mut(&mut self) -> Result<&mut LearnerSession, SessionError> {
        self.active.as_mut().ok_or(SessionError::NotSignedIn)
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("clock", &self.clock)
            .field("identity", &self.identities.current())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use quest_core::model::{CourseId, QuizResult, Role};
    use quest_core::time::{fixed_clock, fixed_now};

    struct RejectAll;

    impl Authenticator for RejectAll {
        fn authenticate(&self, _: &Credentials) -> Result<Identity, AuthError> {
            Err(AuthError::Rejected)
        }
    }

    fn passed_math() -> QuizResult {
        QuizResult::new(CourseId::new(CourseId::MATH_ADVENTURE), 80.0, fixed_now()).unwrap()
    }

    #[test]
    fn nothing_is_active_before_login() {
        let sessions = SessionManager::mock(fixed_clock());
        assert!(!sessions.is_authenticated());
        assert_eq!(sessions.active().unwrap_err(), SessionError::NotSignedIn);
        assert_eq!(sessions.age_hint(), 8);
    }

    #[test]
    fn login_starts_empty_progress() {
        let mut sessions = SessionManager::mock(fixed_clock());
        let creds = Credentials::new("sam@example.com", "pw")
            .with_role(Role::Child)
            .with_child_age(10);
        let session = sessions.login(&creds).unwrap();
        assert!(session.progress().results().is_empty());
        assert_eq!(session.started_at(), fixed_now());
        assert_eq!(sessions.identity().unwrap().display_name(), "sam");
        assert_eq!(sessions.age_hint(), 10);
    }

    #[test]
    fn logout_drops_progress_and_stales_views() {
        let mut sessions = SessionManager::mock(fixed_clock());
        let session = sessions.login(&Credentials::new("a@b.c", "pw")).unwrap();
        session.progress_mut().record_result(passed_math());
        let ticket = session.view().ticket();

        let gone = sessions.logout().unwrap();
        assert_eq!(gone.display_name(), "a");
        assert!(!ticket.is_current());
        assert!(sessions.active().is_err());

        let again = sessions.login(&Credentials::new("a@b.c", "pw")).unwrap();
        assert!(again.progress().results().is_empty());
    }

    #[test]
    fn child_views_die_with_the_session() {
        let mut sessions = SessionManager::mock(fixed_clock());
        let session = sessions.login(&Credentials::new("a@b.c", "pw")).unwrap();
        let quiz_view = session.child_view();
        let chat_view = session.child_view();
        let pending = quiz_view.ticket();

        chat_view.invalidate();
        assert!(pending.is_current());

        sessions.logout();
        assert!(!pending.is_current());
        assert!(!quiz_view.is_live());
    }

    #[test]
    fn relogin_stales_views_from_the_previous_session() {
        let mut sessions = SessionManager::mock(fixed_clock());
        let old_view = sessions
            .login(&Credentials::new("a@b.c", "pw"))
            .unwrap()
            .child_view();
        let fresh_view = sessions
            .login(&Credentials::new("d@e.f", "pw"))
            .unwrap()
            .child_view();
        assert!(!old_view.is_live());
        assert!(fresh_view.is_live());
    }

    #[test]
    fn rejected_login_keeps_current_session() {
        let mut sessions = SessionManager::new(fixed_clock(), Arc::new(RejectAll));
        assert_eq!(
            sessions.login(&Credentials::new("x@y.z", "bad")).unwrap_err(),
            SessionError::Auth(AuthError::Rejected)
        );
        assert!(!sessions.is_authenticated());
        assert!(sessions.logout().is_none());
    }
}
