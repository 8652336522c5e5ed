//! Per-target resolution.
//!
//! # Responsibilities
//! - Substitute endpoint and fork templates from bindings
//! - Read and validate the signing credential
//! - Build the account list according to the accounts policy
//! - Validate the fee policy
//!
//! # Design Decisions
//! - Resolution is a pure function of (definition, bindings); no caching
//! - A profile is either complete or not produced at all
//! - resolve_all isolates failures per target

use std::collections::BTreeMap;

use url::Url;

use crate::config::schema::{AccountsPolicy, FeePolicy, ProjectConfig, TargetDefinition};
use crate::config::validation::TargetSet;
use crate::credentials::Credential;
use crate::env::{EnvironmentBindings, Template, TemplateError};
use crate::resolver::types::{Fee, NamedAccount, ResolveError, ResolveResult, ResolvedProfile};

/// Upper bound on accounts taken from an [`AccountIndex`].
pub const MAX_INDEXED_ACCOUNTS: usize = 256;

/// External index-to-credential mapping for `indexed-account-set` targets.
///
/// Indices are queried from 0 upward until `None` is returned.
pub trait AccountIndex: Send + Sync {
    fn credential(&self, target: &str, index: usize) -> Option<Credential>;
}

/// An index with no accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndexedAccounts;

impl AccountIndex for NoIndexedAccounts {
    fn credential(&self, _target: &str, _index: usize) -> Option<Credential> {
        None
    }
}

/// The same accounts for every target.
impl AccountIndex for Vec<Credential> {
    fn credential(&self, _target: &str, index: usize) -> Option<Credential> {
        self.get(index).cloned()
    }
}

static NO_INDEXED_ACCOUNTS: NoIndexedAccounts = NoIndexedAccounts;

/// Resolves targets against one bindings snapshot.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    env: &'a EnvironmentBindings,
    account_index: &'a dyn AccountIndex,
    named_accounts: Option<&'a BTreeMap<String, usize>>,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a EnvironmentBindings) -> Self {
        Self {
            env,
            account_index: &NO_INDEXED_ACCOUNTS,
            named_accounts: None,
        }
    }

    /// A resolver that also binds the project's named accounts.
    pub fn for_project(config: &'a ProjectConfig, env: &'a EnvironmentBindings) -> Self {
        Self::new(env).with_named_accounts(&config.named_accounts)
    }

    pub fn with_account_index(mut self, index: &'a dyn AccountIndex) -> Self {
        self.account_index = index;
        self
    }

    pub fn with_named_accounts(mut self, named: &'a BTreeMap<String, usize>) -> Self {
        self.named_accounts = Some(named);
        self
    }

    /// Resolve a single target.
    pub fn resolve(&self, target: &TargetDefinition) -> ResolveResult<ResolvedProfile> {
        let endpoint = self.render_url("endpoint", &target.endpoint)?;
        let fork = target
            .fork
            .as_deref()
            .map(|template| self.render_url("fork", template))
            .transpose()?;
        let accounts = self.accounts(target)?;
        let fee = resolve_fee(target.fee)?;
        let named_accounts = self.bind_named_accounts(&accounts);

        tracing::debug!(
            target_name = %target.name,
            chain_id = ?target.chain_id,
            accounts = accounts.len(),
            fee = ?fee,
            "Target resolved"
        );

        Ok(ResolvedProfile {
            target: target.name.clone(),
            endpoint,
            fork,
            chain_id: target.chain_id,
            accounts,
            named_accounts,
            fee,
        })
    }

    /// Resolve every target independently.
    pub fn resolve_all(
        &self,
        targets: &TargetSet,
    ) -> BTreeMap<String, ResolveResult<ResolvedProfile>> {
        targets
            .iter()
            .map(|target| {
                let result = self.resolve(target);
                if let Err(e) = &result {
                    // Unused targets may legitimately be misconfigured.
                    tracing::debug!(target_name = %target.name, error = %e, "Target did not resolve");
                }
                (target.name.clone(), result)
            })
            .collect()
    }

    /// Resolve only the invoked target, or the project default.
    pub fn resolve_selected(
        &self,
        config: &ProjectConfig,
        name: Option<&str>,
    ) -> ResolveResult<ResolvedProfile> {
        let name = name.unwrap_or(config.default_target.as_str());
        let target = config
            .target(name)
            .ok_or_else(|| ResolveError::UnknownTarget(name.to_string()))?;

        tracing::info!(target_name = %name, "Resolving target");
        self.resolve(target)
    }

    fn render_url(&self, field: &'static str, source: &str) -> ResolveResult<String> {
        let rendered = Template::parse(source)
            .and_then(|template| template.render(self.env))
            .map_err(|e| match e {
                TemplateError::Unbound(var) => ResolveError::MissingBinding(var),
                reason => ResolveError::MalformedTemplate { field, reason },
            })?;

        Url::parse(&rendered).map_err(|e| ResolveError::InvalidEndpoint {
            field,
            template: source.to_string(),
            reason: e.to_string(),
        })?;

        Ok(rendered)
    }

    fn accounts(&self, target: &TargetDefinition) -> ResolveResult<Vec<Credential>> {
        if target.accounts == AccountsPolicy::SingleCredential {
            return Ok(self.credential(target)?.into_iter().collect());
        }

        // A declared credential is still checked when the policy does not
        // use it, so a required key never yields an unsigned profile.
        if target.credential_source.is_some() || target.credential_required {
            self.credential(target)?;
        }

        match target.accounts {
            AccountsPolicy::IndexedAccountSet => Ok(self.indexed_accounts(target)),
            _ => Ok(Vec::new()),
        }
    }

    fn indexed_accounts(&self, target: &TargetDefinition) -> Vec<Credential> {
        let accounts: Vec<Credential> = (0..MAX_INDEXED_ACCOUNTS)
            .map_while(|index| self.account_index.credential(&target.name, index))
            .collect();

        if accounts.len() == MAX_INDEXED_ACCOUNTS
            && self
                .account_index
                .credential(&target.name, MAX_INDEXED_ACCOUNTS)
                .is_some()
        {
            tracing::warn!(
                target_name = %target.name,
                limit = MAX_INDEXED_ACCOUNTS,
                "Account index truncated"
            );
        }

        accounts
    }

    fn credential(&self, target: &TargetDefinition) -> ResolveResult<Option<Credential>> {
        let Some(var) = target.credential_source.as_deref() else {
            return if target.credential_required {
                Err(ResolveError::MissingCredential {
                    target: target.name.clone(),
                    var: None,
                })
            } else {
                Ok(None)
            };
        };

        match self.env.get(var) {
            Some(raw) => Credential::parse(raw, target.credential_format)
                .map(Some)
                .map_err(|reason| ResolveError::MalformedCredential {
                    var: var.to_string(),
                    reason,
                }),
            None if target.credential_required => Err(ResolveError::MissingCredential {
                target: target.name.clone(),
                var: Some(var.to_string()),
            }),
            None => {
                tracing::debug!(target_name = %target.name, variable = %var, "No credential set, profile is read-only");
                Ok(None)
            }
        }
    }

    fn bind_named_accounts(&self, accounts: &[Credential]) -> BTreeMap<String, NamedAccount> {
        self.named_accounts
            .into_iter()
            .flatten()
            .filter_map(|(name, &index)| {
                accounts.get(index).map(|credential| {
                    (
                        name.clone(),
                        NamedAccount {
                            index,
                            address: credential.address(),
                        },
                    )
                })
            })
            .collect()
    }
}

fn resolve_fee(policy: FeePolicy) -> ResolveResult<Fee> {
    match policy {
        FeePolicy::NetworkDefault => Ok(Fee::NetworkDefault),
        FeePolicy::Fixed(amount) => u64::try_from(amount)
            .map(Fee::Fixed)
            .map_err(|_| ResolveError::InvalidFee(amount)),
    }
}

/// Resolve one target with no indexed accounts or named accounts.
pub fn resolve_target(
    target: &TargetDefinition,
    env: &EnvironmentBindings,
) -> ResolveResult<ResolvedProfile> {
    Resolver::new(env).resolve(target)
}

/// Resolve every target; one failure never affects another.
pub fn resolve_all(
    targets: &TargetSet,
    env: &EnvironmentBindings,
) -> BTreeMap<String, ResolveResult<ResolvedProfile>> {
    Resolver::new(env).resolve_all(targets)
}

/// Resolve the named target of a project, or its default when `name` is `None`.
pub fn resolve_selected(
    config: &ProjectConfig,
    name: Option<&str>,
    env: &EnvironmentBindings,
) -> ResolveResult<ResolvedProfile> {
    Resolver::for_project(config, env).resolve_selected(config, name)
}
