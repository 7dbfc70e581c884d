//! The menu controller driving an ATM session over line-oriented input.
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::bank::{
    AtmConfig, TransactionError,
    types::{Pin, Role, format_money, money_from_units},
};

const INVALID_CHOICE: &str = "Enter Valid Data !!!";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The operator chose exit from a menu.
    Exited,
    /// The PIN did not match; no menu was entered.
    AuthenticationFailed,
}

impl SessionOutcome {
    /// The process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionOutcome::Exited => 0,
            SessionOutcome::AuthenticationFailed => 1,
        }
    }
}

/// Errors that end a session abnormally.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input closed before the session ended")]
    InputClosed,
}

/// Entries of the role selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleChoice {
    Login(Role),
    Contact,
}

impl RoleChoice {
    fn from_selection(selection: &str) -> Option<Self> {
        match selection.parse::<u8>().ok()? {
            1 => Some(RoleChoice::Login(Role::User)),
            2 => Some(RoleChoice::Login(Role::Admin)),
            3 => Some(RoleChoice::Contact),
            _ => None,
        }
    }
}

/// Entries of the user menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserChoice {
    CheckBalance,
    Withdraw,
    ShowDetails,
    UpdateMobile,
    Exit,
}

impl UserChoice {
    fn from_selection(selection: &str) -> Option<Self> {
        match selection.parse::<u8>().ok()? {
            1 => Some(UserChoice::CheckBalance),
            2 => Some(UserChoice::Withdraw),
            3 => Some(UserChoice::ShowDetails),
            4 => Some(UserChoice::UpdateMobile),
            5 => Some(UserChoice::Exit),
            _ => None,
        }
    }
}

/// Entries of the admin menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminChoice {
    CheckBalance,
    ShowUserDetails,
    ShowAdminDetails,
    Exit,
}

impl AdminChoice {
    fn from_selection(selection: &str) -> Option<Self> {
        match selection.parse::<u8>().ok()? {
            1 => Some(AdminChoice::CheckBalance),
            2 => Some(AdminChoice::ShowUserDetails),
            3 => Some(AdminChoice::ShowAdminDetails),
            4 => Some(AdminChoice::Exit),
            _ => None,
        }
    }
}

/// A single ATM session: role selection, PIN check, then the role's menu loop.
pub struct Atm<R, W> {
    config: AtmConfig,
    input: R,
    output: W,
}

impl<R, W> Atm<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a session over the given accounts and console streams.
    pub fn new(config: AtmConfig, input: R, output: W) -> Self {
        Atm {
            config,
            input,
            output,
        }
    }

    /// Retrieves the accounts as they currently stand.
    #[cfg(test)]
    pub fn get_config(&self) -> &AtmConfig {
        &self.config
    }

    /// Splits the session back into its accounts and streams.
    #[cfg(test)]
    pub fn into_parts(self) -> (AtmConfig, R, W) {
        (self.config, self.input, self.output)
    }

    /// Runs the session until the operator exits or authentication fails.
    pub async fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        let role = self.select_role().await?;
        debug!(%role, "role selected");

        if !self.authenticate(role).await? {
            warn!(%role, "authentication failed");
            self.say("Invalid PIN. Exiting...").await?;
            return Ok(SessionOutcome::AuthenticationFailed);
        }
        info!(%role, "authenticated");

        match role {
            Role::User => self.user_menu().await?,
            Role::Admin => self.admin_menu().await?,
        }
        Ok(SessionOutcome::Exited)
    }

    async fn select_role(&mut self) -> Result<Role, SessionError> {
        loop {
            self.say("\nWelcome to the bank ATM!").await?;
            self.say("Select User Type:").await?;
            self.say("1. User").await?;
            self.say("2. Admin").await?;
            self.say("3. Contact Us").await?;
            let line = self.read_line().await?;
            match RoleChoice::from_selection(&line) {
                Some(RoleChoice::Login(role)) => return Ok(role),
                Some(RoleChoice::Contact) => {
                    let contact = self.config.support_contact.clone();
                    self.say(&contact).await?;
                }
                None => self.say(INVALID_CHOICE).await?,
            }
            self.pause().await?;
        }
    }

    /// Reads a PIN and checks it against the account for `role`.
    /// Input that is not a number never authenticates.
    async fn authenticate(&mut self, role: Role) -> Result<bool, SessionError> {
        self.prompt("Enter your PIN to log in: ").await?;
        let line = self.read_line().await?;
        let Ok(candidate) = line.parse::<Pin>() else {
            return Ok(false);
        };
        Ok(match role {
            Role::User => self.config.user.authenticate(candidate),
            Role::Admin => candidate == self.config.admin_pin,
        })
    }

    async fn user_menu(&mut self) -> Result<(), SessionError> {
        loop {
            self.say("\n**** Welcome to ATM *****").await?;
            self.say("Select Options").await?;
            self.say("1. Check Balance").await?;
            self.say("2. Cash withdraw").await?;
            self.say("3. Show User Details").await?;
            self.say("4. Update Mobile no.").await?;
            self.say("5. Exit").await?;
            let line = self.read_line().await?;
            match UserChoice::from_selection(&line) {
                Some(UserChoice::CheckBalance) => self.show_user_balance().await?,
                Some(UserChoice::Withdraw) => self.withdraw().await?,
                Some(UserChoice::ShowDetails) => self.show_user_details().await?,
                Some(UserChoice::UpdateMobile) => self.update_mobile().await?,
                Some(UserChoice::Exit) => return Ok(()),
                None => self.say(INVALID_CHOICE).await?,
            }
            self.pause().await?;
        }
    }

    async fn admin_menu(&mut self) -> Result<(), SessionError> {
        loop {
            self.say("\n**** Welcome to ATM (Admin) *****").await?;
            self.say("Select Options").await?;
            self.say("1. Check User Balance").await?;
            self.say("2. Show User Details").await?;
            self.say("3. Show Admin Details").await?;
            self.say("4. Exit").await?;
            let line = self.read_line().await?;
            match AdminChoice::from_selection(&line) {
                Some(AdminChoice::CheckBalance) => self.show_user_balance().await?,
                Some(AdminChoice::ShowUserDetails) => self.show_user_details().await?,
                Some(AdminChoice::ShowAdminDetails) => {
                    let details = self.config.admin.to_string();
                    self.say(&details).await?;
                }
                Some(AdminChoice::Exit) => return Ok(()),
                None => self.say(INVALID_CHOICE).await?,
            }
            self.pause().await?;
        }
    }

    async fn show_user_balance(&mut self) -> Result<(), SessionError> {
        let balance = format_money(self.config.user.get_balance());
        self.say(&format!("User's Bank balance is : {balance}")).await
    }

    async fn show_user_details(&mut self) -> Result<(), SessionError> {
        let details = self.config.user.to_string();
        self.say(&details).await
    }

    /// Amounts are whole currency units; anything unparseable is rejected like a bad amount.
    async fn withdraw(&mut self) -> Result<(), SessionError> {
        self.prompt("Enter the amount : ").await?;
        let line = self.read_line().await?;
        let amount = line.parse::<i64>().ok().and_then(money_from_units);
        let result = match amount {
            Some(amount) => self.config.user.cash_withdraw(amount),
            None => Err(TransactionError::InvalidAmountOrInsufficientBalance),
        };
        match result {
            Ok(balance) => {
                self.say("Please Collect Your Cash").await?;
                self.say(&format!("Available Balance : {}", format_money(balance)))
                    .await
            }
            Err(err) => self.say(&err.to_string()).await,
        }
    }

    async fn update_mobile(&mut self) -> Result<(), SessionError> {
        self.prompt("Enter Old Mobile No. : ").await?;
        let previous = self.read_line().await?;
        self.prompt("Enter New Mobile No. : ").await?;
        let new = self.read_line().await?;
        match self.config.user.set_mobile(&previous, new) {
            Ok(()) => self.say("Successfully Updated Mobile no.").await,
            Err(err) => self.say(&err.to_string()).await,
        }
    }

    async fn pause(&mut self) -> Result<(), SessionError> {
        self.prompt("Press Enter to continue...").await?;
        self.read_line().await?;
        Ok(())
    }

    /// Reads one line with surrounding whitespace removed.
    async fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    async fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn say(&mut self, text: &str) -> Result<(), SessionError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}
