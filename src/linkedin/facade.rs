// src/linkedin/facade.rs
//! Ordering facade over the login and apply components.
//!
//! The facade is the one fail-fast surface of the client: every operation
//! validates its preconditions and refuses to run out of order, so a caller
//! cannot start applying before credentials are set and login has happened.

use anyhow::Result;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FacadeError {
    #[error("{0} must be set before proceeding.")]
    Unmet(&'static str),

    #[error("{0} cannot be empty.")]
    Empty(&'static str),
}

/// Preconditions tracked by [`BotState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    CredentialsSet,
    JobApplicationProfileSet,
    GptAnswererSet,
    ParametersSet,
    LoggedIn,
}

impl Requirement {
    fn label(self) -> &'static str {
        match self {
            Requirement::CredentialsSet => "Credentials set",
            Requirement::JobApplicationProfileSet => "Job application profile set",
            Requirement::GptAnswererSet => "Gpt answerer set",
            Requirement::ParametersSet => "Parameters set",
            Requirement::LoggedIn => "Logged in",
        }
    }
}

#[derive(Debug, Default)]
pub struct BotState {
    pub credentials_set: bool,
    pub job_application_profile_set: bool,
    pub gpt_answerer_set: bool,
    pub parameters_set: bool,
    pub logged_in: bool,
}

impl BotState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fail on the first unmet requirement, naming it in the error message.
    pub fn validate(&self, required: &[Requirement]) -> Result<(), FacadeError> {
        for requirement in required {
            let met = match requirement {
                Requirement::CredentialsSet => self.credentials_set,
                Requirement::JobApplicationProfileSet => self.job_application_profile_set,
                Requirement::GptAnswererSet => self.gpt_answerer_set,
                Requirement::ParametersSet => self.parameters_set,
                Requirement::LoggedIn => self.logged_in,
            };
            if !met {
                return Err(FacadeError::Unmet(requirement.label()));
            }
        }
        Ok(())
    }
}

/// Interactive login flow, driven outside this crate (browser automation or
/// cookie import). The facade only sequences it.
pub trait LoginComponent {
    fn set_secrets(&mut self, email: &str, password: &str);
    fn start(&mut self) -> Result<()>;
}

/// Answers form questions from the applicant's profile and resume.
pub trait AnswerEngine {
    fn set_job_application_profile(&mut self, profile: &str);
    fn set_resume(&mut self, resume: &str);
}

/// Produces a tailored resume document for upload during an application.
pub trait ResumeGenerator {
    fn generate(&mut self, profile: &str) -> Result<std::path::PathBuf>;
}

/// The application flow proper; consumes the answer engine and resume
/// generator the facade wires in.
pub trait ApplyComponent {
    fn set_answer_engine(&mut self, engine: Box<dyn AnswerEngine>);
    fn set_resume_generator(&mut self, generator: Box<dyn ResumeGenerator>);
    fn set_parameters(&mut self, parameters: HashMap<String, String>);
    fn start_applying(&mut self) -> Result<()>;
}

pub struct BotFacade<L: LoginComponent, A: ApplyComponent> {
    login_component: L,
    apply_component: A,
    state: BotState,
    job_application_profile: Option<String>,
    resume: Option<String>,
    email: Option<String>,
    password: Option<String>,
    parameters: Option<HashMap<String, String>>,
}

impl<L: LoginComponent, A: ApplyComponent> BotFacade<L, A> {
    pub fn new(login_component: L, apply_component: A) -> Self {
        Self {
            login_component,
            apply_component,
            state: BotState::new(),
            job_application_profile: None,
            resume: None,
            email: None,
            password: None,
            parameters: None,
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    pub fn set_secrets(&mut self, email: &str, password: &str) -> Result<(), FacadeError> {
        validate_non_empty(email, "Email")?;
        validate_non_empty(password, "Password")?;
        self.email = Some(email.to_string());
        self.password = Some(password.to_string());
        self.state.credentials_set = true;
        Ok(())
    }

    pub fn set_job_application_profile_and_resume(
        &mut self,
        profile: &str,
        resume: &str,
    ) -> Result<(), FacadeError> {
        validate_non_empty(profile, "Job application profile")?;
        validate_non_empty(resume, "Resume")?;
        self.job_application_profile = Some(profile.to_string());
        self.resume = Some(resume.to_string());
        self.state.job_application_profile_set = true;
        Ok(())
    }

    pub fn set_gpt_answerer_and_resume_generator(
        &mut self,
        mut answerer: Box<dyn AnswerEngine>,
        resume_generator: Box<dyn ResumeGenerator>,
    ) -> Result<(), FacadeError> {
        if !self.state.job_application_profile_set {
            return Err(FacadeError::Unmet("Job application profile and resume"));
        }
        if let Some(profile) = &self.job_application_profile {
            answerer.set_job_application_profile(profile);
        }
        if let Some(resume) = &self.resume {
            answerer.set_resume(resume);
        }
        self.apply_component.set_answer_engine(answerer);
        self.apply_component.set_resume_generator(resume_generator);
        self.state.gpt_answerer_set = true;
        Ok(())
    }

    pub fn set_parameters(
        &mut self,
        parameters: HashMap<String, String>,
    ) -> Result<(), FacadeError> {
        if parameters.is_empty() {
            return Err(FacadeError::Empty("Parameters"));
        }
        self.apply_component.set_parameters(parameters.clone());
        self.parameters = Some(parameters);
        self.state.parameters_set = true;
        Ok(())
    }

    pub fn start_login(&mut self) -> Result<()> {
        self.state.validate(&[Requirement::CredentialsSet])?;
        let email = self.email.as_deref().unwrap_or_default().to_string();
        let password = self.password.as_deref().unwrap_or_default().to_string();
        self.login_component.set_secrets(&email, &password);
        self.login_component.start()?;
        self.state.logged_in = true;
        Ok(())
    }

    pub fn start_apply(&mut self) -> Result<()> {
        self.state.validate(&[
            Requirement::LoggedIn,
            Requirement::JobApplicationProfileSet,
            Requirement::GptAnswererSet,
            Requirement::ParametersSet,
        ])?;
        self.apply_component.start_applying()
    }
}

fn validate_non_empty(value: &str, name: &'static str) -> Result<(), FacadeError> {
    if value.is_empty() {
        return Err(FacadeError::Empty(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeLogin {
        started: bool,
    }

    impl LoginComponent for FakeLogin {
        fn set_secrets(&mut self, _email: &str, _password: &str) {}

        fn start(&mut self) -> Result<()> {
            self.started = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeApply {
        applying: bool,
    }

    impl ApplyComponent for FakeApply {
        fn set_answer_engine(&mut self, _engine: Box<dyn AnswerEngine>) {}
        fn set_resume_generator(&mut self, _generator: Box<dyn ResumeGenerator>) {}
        fn set_parameters(&mut self, _parameters: HashMap<String, String>) {}

        fn start_applying(&mut self) -> Result<()> {
            self.applying = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeAnswerer;

    impl AnswerEngine for FakeAnswerer {
        fn set_job_application_profile(&mut self, _profile: &str) {}
        fn set_resume(&mut self, _resume: &str) {}
    }

    struct FakeGenerator;

    impl ResumeGenerator for FakeGenerator {
        fn generate(&mut self, _profile: &str) -> Result<std::path::PathBuf> {
            Ok(std::path::PathBuf::from("resume.pdf"))
        }
    }

    fn facade() -> BotFacade<FakeLogin, FakeApply> {
        BotFacade::new(FakeLogin::default(), FakeApply::default())
    }

    #[test]
    fn test_start_apply_before_login() {
        let mut bot = facade();
        let err = bot.start_apply().expect_err("must require login");
        assert_eq!(
            err.to_string(),
            "Logged in must be set before proceeding."
        );
    }

    #[test]
    fn test_start_login_requires_credentials() {
        let mut bot = facade();
        let err = bot.start_login().expect_err("must require credentials");
        assert_eq!(
            err.to_string(),
            "Credentials set must be set before proceeding."
        );
    }

    #[test]
    fn test_empty_email_rejected() {
        let mut bot = facade();
        let err = bot.set_secrets("", "hunter2").expect_err("empty email");
        assert_eq!(err.to_string(), "Email cannot be empty.");
    }

    #[test]
    fn test_empty_parameters_rejected() {
        let mut bot = facade();
        let err = bot
            .set_parameters(HashMap::new())
            .expect_err("empty parameters");
        assert_eq!(err.to_string(), "Parameters cannot be empty.");
    }

    #[test]
    fn test_answerer_requires_profile_first() {
        let mut bot = facade();
        let err = bot
            .set_gpt_answerer_and_resume_generator(
                Box::new(FakeAnswerer),
                Box::new(FakeGenerator),
            )
            .expect_err("profile must come first");
        assert_eq!(
            err.to_string(),
            "Job application profile and resume must be set before proceeding."
        );
    }

    #[test]
    fn test_full_flow_in_order() {
        let mut bot = facade();
        bot.set_secrets("user@example.com", "hunter2").expect("secrets");
        bot.set_job_application_profile_and_resume("profile", "resume")
            .expect("profile");
        bot.set_gpt_answerer_and_resume_generator(
            Box::new(FakeAnswerer),
            Box::new(FakeGenerator),
        )
        .expect("answerer");
        bot.set_parameters(
            [("positions".to_string(), "developer".to_string())]
                .into_iter()
                .collect(),
        )
        .expect("parameters");
        bot.start_login().expect("login");
        bot.start_apply().expect("apply");
        assert!(bot.state().logged_in);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut bot = facade();
        bot.set_secrets("user@example.com", "hunter2").expect("secrets");
        bot.state.reset();
        assert!(!bot.state().credentials_set);
    }
}
