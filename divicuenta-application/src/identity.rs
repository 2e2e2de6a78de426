use divicuenta_domain::PayerInfo;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    error::{AuthError, StoreError},
    ports::{IdGenerator, KeyValueStore},
    storage::{CURRENT_USER_KEY, USERS_KEY, load_json, save_json},
};

/// Registered user as exposed to the rest of the app. Never carries
/// credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub phone: String,
    #[serde(flatten)]
    pub payer: PayerInfo,
}

impl UserProfile {
    pub fn first_name(&self) -> &str {
        self.payer.name.split(' ').next().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    #[serde(flatten)]
    profile: UserProfile,
    password_hash: String,
}

/// Sign-up form input.
#[derive(Clone, Debug, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub rut: String,
    pub phone: String,
    pub bank: String,
    pub account_type: String,
    pub account_number: String,
}

impl Registration {
    fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("rut", &self.rut),
            ("phone", &self.phone),
            ("bank", &self.bank),
            ("account_type", &self.account_type),
            ("account_number", &self.account_number),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(AuthError::MissingField { field: *field }),
            None => Ok(()),
        }
    }
}

/// Transfer details used when nobody is logged in.
pub fn guest_payer() -> PayerInfo {
    PayerInfo {
        name: "Juan Perez (Invitado)".to_string(),
        rut: "12.345.678-9".to_string(),
        bank: "Banco Estado".to_string(),
        account_type: "Cuenta Corriente".to_string(),
        account_number: "1234567890".to_string(),
    }
}

/// Local accounts and the currently logged-in profile.
pub struct IdentityProvider<'a> {
    store: &'a dyn KeyValueStore,
    ids: &'a dyn IdGenerator,
    current: Option<UserProfile>,
}

impl<'a> IdentityProvider<'a> {
    pub fn open(store: &'a dyn KeyValueStore, ids: &'a dyn IdGenerator) -> Result<Self, StoreError> {
        let current = load_json(store, CURRENT_USER_KEY)?;
        Ok(Self {
            store,
            ids,
            current,
        })
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn sign_up(&self, registration: Registration) -> Result<UserProfile, AuthError> {
        registration.validate()?;

        let mut users = self.load_users()?;
        if users
            .iter()
            .any(|user| user.profile.email == registration.email)
        {
            return Err(AuthError::DuplicateEmail);
        }

        let profile = UserProfile {
            id: self.ids.next_id("user"),
            email: registration.email,
            phone: registration.phone,
            payer: PayerInfo {
                name: registration.name,
                rut: registration.rut,
                bank: registration.bank,
                account_type: registration.account_type,
                account_number: registration.account_number,
            },
        };
        users.push(StoredUser {
            profile: profile.clone(),
            password_hash: hash_password(&registration.password),
        });
        save_json(self.store, USERS_KEY, &users)?;

        tracing::info!(user_id = %profile.id, "user registered");
        Ok(profile)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&UserProfile, AuthError> {
        let password_hash = hash_password(password);
        let profile = self
            .load_users()?
            .into_iter()
            .find(|user| user.profile.email == email && user.password_hash == password_hash)
            .map(|user| user.profile)
            .ok_or(AuthError::InvalidCredentials)?;

        save_json(self.store, CURRENT_USER_KEY, &profile)?;
        tracing::info!(user_id = %profile.id, "user logged in");
        Ok(self.current.insert(profile))
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.store.remove(CURRENT_USER_KEY)?;
        if let Some(profile) = self.current.take() {
            tracing::info!(user_id = %profile.id, "user logged out");
        }
        Ok(())
    }

    /// Transfer details for the logged-in user, or the guest profile.
    pub fn payer_info(&self) -> PayerInfo {
        match &self.current {
            Some(profile) => profile.payer.clone(),
            None => guest_payer(),
        }
    }

    fn load_users(&self) -> Result<Vec<StoredUser>, StoreError> {
        Ok(load_json(self.store, USERS_KEY)?.unwrap_or_default())
    }
}

fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}
