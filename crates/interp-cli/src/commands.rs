use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use interp_core::models::{
    CallSession, CustomerInfo, Id, Language, QueueMetrics, QueueSnapshot, TranslatorRegistration,
};
use interp_core::{ApiClient, Config, CredentialStore, NavigationSlot, LOGIN_PATH};
use tracing::{info, warn};

use crate::{CallsCommand, Commands, QueueCommand};

pub struct App {
    config: Config,
    client: ApiClient,
    navigation: Arc<NavigationSlot>,
}

impl App {
    pub fn new(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let navigation = Arc::new(NavigationSlot::new());
        let client = ApiClient::from_config(&config, store, navigation.clone())
            .context("Failed to create API client")?;
        info!(base_url = %client.base_url(), "Using API");
        Ok(Self {
            config,
            client,
            navigation,
        })
    }

    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { email } => self.login(email).await,
            Commands::Logout => {
                let ack = self.client.auth().logout().await?;
                println!("{}", ack.message().unwrap_or("Logged out."));
                Ok(())
            }
            Commands::Whoami => {
                let user = self.client.auth().current_user().await?;
                println!("{} <{}>", user.display_name(), user.email);
                if let Some(role) = user.role {
                    println!("Role: {}", role);
                }
                Ok(())
            }
            Commands::Calls { command } => self.calls(command).await,
            Commands::Queue { command } => match command {
                QueueCommand::Show => {
                    print_queue(&self.client.queue().queue().await?);
                    Ok(())
                }
                QueueCommand::Metrics => {
                    print_metrics(&self.client.queue().metrics().await?);
                    Ok(())
                }
            },
            Commands::Status => self.status().await,
            Commands::RegisterTranslator {
                email,
                name,
                languages,
                hourly_rate,
            } => self.register_translator(email, name, languages, hourly_rate).await,
            Commands::VerifyEmail { token } => {
                let ack = self.client.auth().verify_email(&token).await?;
                println!("{}", ack.message().unwrap_or("Email verified."));
                Ok(())
            }
            Commands::ResendVerification { email } => {
                let ack = self.client.auth().resend_verification(&email).await?;
                println!("{}", ack.message().unwrap_or("Verification email sent."));
                Ok(())
            }
        }
    }

    /// Tell the user about a pending redirect to the login page
    pub fn report_navigation(&self, after_login: bool) {
        if let Some(notice) = self
            .navigation
            .take()
            .and_then(|target| navigation_notice(&target, after_login))
        {
            eprintln!("{}", notice);
        }
    }

    async fn login(&self, email: Option<String>) -> Result<()> {
        let email = match email.or_else(|| self.config.last_email.clone()) {
            Some(email) => email,
            None => prompt("Email: ")?,
        };
        let password = rpassword::prompt_password("Password: ")?;

        println!("\nAuthenticating...");
        let session = self.client.auth().login(&email, &password).await?;

        let mut config = Config::load_file().unwrap_or_default();
        config.last_email = Some(email);
        if let Err(e) = config.save() {
            warn!(error = %e, "Failed to save config");
        }

        println!("Logged in as {}", session.user.display_name());
        Ok(())
    }

    async fn calls(&self, command: CallsCommand) -> Result<()> {
        let calls = self.client.calls();
        match command {
            CallsCommand::Active => {
                let active = calls.active_calls().await?;
                if active.is_empty() {
                    println!("No active calls.");
                }
                for call in &active {
                    self.print_call(call);
                }
            }
            CallsCommand::Start {
                room,
                customer_name,
                customer_language,
                customer_phone,
            } => {
                let info = CustomerInfo {
                    name: customer_name,
                    language: customer_language,
                    phone: customer_phone,
                    ..Default::default()
                };
                let info = (!info.is_empty()).then_some(info);
                let call = calls.start_call(&room, info.as_ref()).await?;
                println!("Started call {}", call.id);
                self.print_call(&call);
            }
            CallsCommand::End { call_id } => {
                let ack = calls.end_call(&Id::new(call_id)).await?;
                println!("{}", ack.message().unwrap_or("Call ended."));
            }
            CallsCommand::History { limit } => {
                let history = calls.call_history(limit).await?;
                if history.is_empty() {
                    println!("No completed calls.");
                }
                for call in &history {
                    println!(
                        "{:<10} {:<24} {:>10}  {}",
                        call.id,
                        call.room_name.as_deref().unwrap_or("-"),
                        call.duration_display(),
                        call.ended_at.as_deref().unwrap_or("")
                    );
                }
            }
        }
        Ok(())
    }

    /// Fetch calls, queue and metrics concurrently
    async fn status(&self) -> Result<()> {
        let calls = self.client.calls();
        let queue = self.client.queue();
        let (active, snapshot, metrics) =
            futures::join!(calls.active_calls(), queue.queue(), queue.metrics());

        let active = active?;
        println!("Active calls: {}", active.len());
        for call in &active {
            self.print_call(call);
        }
        println!();
        print_queue(&snapshot?);
        println!();
        print_metrics(&metrics?);
        Ok(())
    }

    async fn register_translator(
        &self,
        email: Option<String>,
        name: Option<String>,
        languages: Vec<String>,
        hourly_rate: Option<String>,
    ) -> Result<()> {
        let name = match name {
            Some(name) => name,
            None => prompt("Full name: ")?,
        };
        let email = match email {
            Some(email) => email,
            None => prompt("Email: ")?,
        };
        let password = rpassword::prompt_password("Password: ")?;
        let confirm_password = rpassword::prompt_password("Confirm password: ")?;

        let mut form = TranslatorRegistration {
            email,
            name,
            password,
            confirm_password,
            hourly_rate: hourly_rate.unwrap_or_default(),
            ..Default::default()
        };
        for language in &languages {
            let language: Language = language.parse()?;
            if !form.languages.contains(&language) {
                form.toggle_language(language);
            }
        }

        self.client.translators().register(&form).await?;

        println!("Registration successful!");
        println!("We've sent a verification link to: {}", form.email);
        println!("Click the link in the email to activate your account. The link will expire in 24 hours.");
        println!("Didn't receive it? Run `interp resend-verification {}`", form.email);
        Ok(())
    }

    fn print_call(&self, call: &CallSession) {
        println!(
            "  {:<10} {:<24} {}",
            call.id,
            call.room_name.as_deref().unwrap_or("-"),
            call.status.as_deref().unwrap_or("")
        );
        if let Some(url) = call.meeting_url(self.config.signaling_domain()) {
            println!("             join: {}", url);
        }
    }
}

fn print_queue(snapshot: &QueueSnapshot) {
    println!("Waiting: {}", snapshot.len());
    for (i, entry) in snapshot.entries.iter().enumerate() {
        let position = entry.position.map(|p| p as usize).unwrap_or(i + 1);
        let wait = entry
            .wait_seconds
            .map(|w| format!("{:.0}s", w))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  #{:<3} {:<20} {:<10} {:>6}",
            position,
            entry.customer_name.as_deref().unwrap_or("(unknown)"),
            entry.language.as_deref().unwrap_or("-"),
            wait
        );
    }
}

fn print_metrics(metrics: &QueueMetrics) {
    fn show<T: std::fmt::Display>(label: &str, value: Option<T>) {
        if let Some(v) = value {
            println!("{:<22} {}", label, v);
        }
    }
    show("Waiting", metrics.total_waiting);
    show("Average wait (s)", metrics.average_wait_seconds.map(|w| format!("{:.1}", w)));
    show("Longest wait (s)", metrics.longest_wait_seconds.map(|w| format!("{:.1}", w)));
    show("Calls today", metrics.calls_handled_today);
    show("Active translators", metrics.active_translators);
    for (key, value) in &metrics.extra {
        println!("{:<22} {}", key, value);
    }
}

/// A rejected login also trips the 401 redirect; there is no session to
/// report as ended then.
fn navigation_notice(target: &str, after_login: bool) -> Option<String> {
    if target != LOGIN_PATH {
        return Some(format!("Continue at {}", target));
    }
    if after_login {
        return None;
    }
    Some("Your session has ended. Run `interp login` to sign in again.".to_string())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
