//! Реестр банков. Заполняется при старте, дальше только читается.

use crate::{
    banks::{caixa::Caixa, itau::Itau},
    barcode,
    digits::ensure_digits,
    error::{BoletoError, Result},
    line::TypeableLine,
    model::{SlipCodes, SlipRecord},
    traits::BankStrategy,
};
use std::{collections::BTreeMap, fmt, sync::OnceLock};

static GLOBAL: OnceLock<BankRegistry> = OnceLock::new();

#[derive(Default)]
pub struct BankRegistry {
    banks: BTreeMap<String, Box<dyn BankStrategy>>,
}

impl BankRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caixa и Itaú.
    pub fn with_builtin_banks() -> Self {
        let mut registry = Self::new();
        registry.banks.insert(Caixa::CODE.into(), Box::new(Caixa));
        registry.banks.insert(Itau::CODE.into(), Box::new(Itau));
        registry
    }

    pub fn register<S>(&mut self, bank_id: &str, strategy: S) -> Result<()>
    where
        S: BankStrategy + 'static,
    {
        ensure_digits("bank", bank_id)?;
        if bank_id.len() != 3 {
            return Err(BoletoError::InvalidInput(format!(
                "bank code must have 3 digits: {bank_id:?}"
            )));
        }
        if bank_id != strategy.code() {
            return Err(BoletoError::InvalidInput(format!(
                "bank code {bank_id} does not match strategy bank {}",
                strategy.code()
            )));
        }
        if self.banks.contains_key(bank_id) {
            return Err(BoletoError::DuplicateBank(bank_id.to_string()));
        }
        tracing::debug!(bank = bank_id, name = strategy.name(), "bank registered");
        self.banks.insert(bank_id.to_string(), Box::new(strategy));
        Ok(())
    }

    pub fn get(&self, bank_id: &str) -> Option<&dyn BankStrategy> {
        self.banks.get(bank_id).map(|b| &**b)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.banks.keys().map(String::as_str)
    }

    /// Код de barras и linha digitável по банку из `slip.bank`.
    pub fn generate(&self, slip: &SlipRecord) -> Result<SlipCodes> {
        let bank = self
            .get(&slip.bank)
            .ok_or_else(|| BoletoError::UnknownBank(slip.bank.clone()))?;
        let barcode = barcode::assemble(slip, bank)?;
        let line = TypeableLine::from_payload(&barcode)?;
        Ok(SlipCodes { barcode, line })
    }
}

impl fmt::Debug for BankRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.banks.iter().map(|(code, b)| (code, b.name())))
            .finish()
    }
}

/// Устанавливает глобальный реестр. Только один раз и до первого `global()`.
pub fn install(registry: BankRegistry) -> Result<()> {
    let codes: Vec<String> = registry.codes().map(str::to_string).collect();
    GLOBAL
        .set(registry)
        .map_err(|_| BoletoError::RegistryInstalled)?;
    tracing::debug!(?codes, "bank registry installed");
    Ok(())
}

/// Установленный реестр; если ничего не ставили — встроенные банки.
pub fn global() -> &'static BankRegistry {
    GLOBAL.get_or_init(BankRegistry::with_builtin_banks)
}

pub fn generate(slip: &SlipRecord) -> Result<SlipCodes> {
    global().generate(slip)
}
