//! Account templates and the resolver that turns a role binding into ordered account metas.

use std::collections::{
    BTreeSet,
    HashMap,
};

use solana_address::Address;
use solana_instruction::AccountMeta;

use crate::error::AccountError;

/// One named, flagged position in an action's account list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountRole {
    pub name: &'static str,
    pub is_signer: bool,
    pub is_writable: bool,
    pub desc: &'static str,
}

impl AccountRole {
    pub const fn new(
        name: &'static str,
        is_signer: bool,
        is_writable: bool,
        desc: &'static str,
    ) -> Self {
        Self {
            name,
            is_signer,
            is_writable,
            desc,
        }
    }

    pub fn meta(&self, address: Address) -> AccountMeta {
        if self.is_writable {
            AccountMeta::new(address, self.is_signer)
        } else {
            AccountMeta::new_readonly(address, self.is_signer)
        }
    }
}

/// Role name to address, supplied by the caller for one instruction.
///
/// Binding a role twice keeps the first address and remembers the role, so [`resolve`] fails with
/// [`AccountError::DuplicateRole`] however the binding was assembled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountBinding {
    roles: HashMap<String, Address>,
    duplicate: Option<String>,
}

impl AccountBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, role: impl Into<String>, address: Address) -> &mut Self {
        if let Err(AccountError::DuplicateRole { role }) = self.try_bind(role, address) {
            self.duplicate.get_or_insert(role);
        }
        self
    }

    /// Builder form of [`AccountBinding::bind`].
    pub fn with(mut self, role: impl Into<String>, address: Address) -> Self {
        self.bind(role, address);
        self
    }

    /// Binds `role` unless it's already bound.
    pub fn try_bind(&mut self, role: impl Into<String>, address: Address) -> Result<(), AccountError> {
        let role = role.into();
        if self.roles.contains_key(&role) {
            return Err(AccountError::DuplicateRole { role });
        }
        self.roles.insert(role, address);
        Ok(())
    }

    pub fn remove(&mut self, role: &str) -> Option<Address> {
        self.roles.remove(role)
    }

    pub fn get(&self, role: &str) -> Option<&Address> {
        self.roles.get(role)
    }

    /// The first role that was bound more than once, if any.
    pub fn duplicate(&self) -> Option<&str> {
        self.duplicate.as_deref()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, &Address)> {
        self.roles.iter().map(|(role, address)| (role.as_str(), address))
    }
}

impl<S: Into<String>> FromIterator<(S, Address)> for AccountBinding {
    fn from_iter<I: IntoIterator<Item = (S, Address)>>(iter: I) -> Self {
        let mut binding = Self::new();
        for (role, address) in iter {
            binding.bind(role, address);
        }
        binding
    }
}

/// Produces one account meta per template role, in template order.
///
/// A role bound twice is rejected before anything else. The first role in template order with no bound address is reported as missing. A binding that
/// names a role the template doesn't declare is rejected, reporting the alphabetically first one.
pub fn resolve(
    template: &[AccountRole],
    binding: &AccountBinding,
) -> Result<Vec<AccountMeta>, AccountError> {
    if let Some(role) = binding.duplicate() {
        return Err(AccountError::DuplicateRole {
            role: role.to_string(),
        });
    }

    let metas = template
        .iter()
        .map(|role| {
            binding
                .get(role.name)
                .map(|address| role.meta(*address))
                .ok_or_else(|| AccountError::MissingAccount {
                    role: role.name.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if binding.len() != template.len() {
        let declared = template.iter().map(|role| role.name).collect::<BTreeSet<_>>();
        let undeclared = binding
            .roles()
            .map(|(role, _)| role)
            .filter(|role| !declared.contains(role))
            .collect::<BTreeSet<_>>();
        if let Some(role) = undeclared.first() {
            return Err(AccountError::UndeclaredRole {
                role: role.to_string(),
            });
        }
    }

    Ok(metas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &[AccountRole] = &[
        AccountRole::new("pool", false, true, "The pool"),
        AccountRole::new("trader", true, false, "The trader"),
        AccountRole::new("quoteVault", false, true, "The quote vault"),
        AccountRole::new("token_program", false, false, "The token program"),
    ];

    fn addr(b: u8) -> Address {
        Address::new_from_array([b; 32])
    }

    fn full_binding() -> AccountBinding {
        AccountBinding::new()
            .with("pool", addr(1))
            .with("trader", addr(2))
            .with("quoteVault", addr(3))
            .with("token_program", addr(4))
    }

    #[test]
    fn resolves_in_template_order_with_flags() {
        let metas = resolve(TEMPLATE, &full_binding()).unwrap();
        assert_eq!(
            metas,
            vec![
                AccountMeta::new(addr(1), false),
                AccountMeta::new_readonly(addr(2), true),
                AccountMeta::new(addr(3), false),
                AccountMeta::new_readonly(addr(4), false),
            ]
        );
    }

    #[test]
    fn missing_role_is_named() {
        let mut binding = full_binding();
        binding.roles.remove("quoteVault");
        assert_eq!(
            resolve(TEMPLATE, &binding).unwrap_err(),
            AccountError::MissingAccount {
                role: "quoteVault".into()
            }
        );
    }

    #[test]
    fn first_missing_in_template_order_wins() {
        let binding = AccountBinding::new().with("pool", addr(1));
        assert_eq!(
            resolve(TEMPLATE, &binding).unwrap_err(),
            AccountError::MissingAccount {
                role: "trader".into()
            }
        );
    }

    #[test]
    fn undeclared_role_is_rejected() {
        let binding = full_binding().with("zeta", addr(9)).with("extra", addr(8));
        assert_eq!(
            resolve(TEMPLATE, &binding).unwrap_err(),
            AccountError::UndeclaredRole {
                role: "extra".into()
            }
        );
    }

    #[test]
    fn same_address_in_two_roles_is_allowed() {
        let binding = full_binding().with("token_program", addr(1));
        assert_eq!(binding.duplicate(), None);
        let metas = resolve(TEMPLATE, &binding).unwrap();
        assert_eq!(metas[0].pubkey, metas[3].pubkey);
    }

    #[test]
    fn rebinding_a_role_is_rejected() {
        let binding = full_binding().with("pool", addr(7));
        assert_eq!(binding.get("pool"), Some(&addr(1)));
        assert_eq!(
            resolve(TEMPLATE, &binding).unwrap_err(),
            AccountError::DuplicateRole {
                role: "pool".into()
            }
        );

        let collected = [("pool", addr(1)), ("trader", addr(2)), ("pool", addr(3))]
            .into_iter()
            .collect::<AccountBinding>();
        assert_eq!(collected.duplicate(), Some("pool"));
        assert_eq!(
            resolve(TEMPLATE, &collected).unwrap_err(),
            AccountError::DuplicateRole {
                role: "pool".into()
            }
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let reversed = TEMPLATE
            .iter()
            .enumerate()
            .rev()
            .map(|(i, role)| (role.name, addr(i as u8 + 1)))
            .collect::<AccountBinding>();
        assert_eq!(
            resolve(TEMPLATE, &reversed).unwrap(),
            resolve(TEMPLATE, &full_binding()).unwrap()
        );
    }

    #[test]
    fn try_bind_rejects_rebinding() {
        let mut binding = AccountBinding::new();
        binding.try_bind("pool", addr(1)).unwrap();
        assert_eq!(
            binding.try_bind("pool", addr(2)).unwrap_err(),
            AccountError::DuplicateRole {
                role: "pool".into()
            }
        );
        assert_eq!(binding.get("pool"), Some(&addr(1)));
    }
}
