//! Трэйт банка: упаковка campo livre и банковские обозначения.

use crate::{
    error::{BoletoError, Result},
    model::{SlipRecord, VariableSegment},
};

pub trait BankStrategy: Send + Sync {
    /// Код банка в коде de barras, три цифры.
    fn code(&self) -> &'static str;

    /// DV кода банка, печатается как `104-0`.
    fn code_digit(&self) -> char;

    fn name(&self) -> &'static str;

    /// Поддерживаемые carteiras.
    fn wallets(&self) -> &'static [&'static str];

    /// 25 цифр campo livre для данного boleto.
    fn pack_variable_segment(&self, slip: &SlipRecord) -> Result<VariableSegment>;

    /// Nosso número в том виде, в каком банк печатает его на boleto.
    fn our_number_label(&self, slip: &SlipRecord) -> Result<String>;

    /// Короткое обозначение carteira для бланка (RG, SR...), если банк его задаёт.
    fn wallet_label(&self, _wallet: &str) -> Option<&'static str> {
        None
    }

    fn supports_wallet(&self, wallet: &str) -> bool {
        self.wallets().contains(&wallet)
    }

    fn code_with_digit(&self) -> String {
        format!("{}-{}", self.code(), self.code_digit())
    }

    /// `UnsupportedWalletCode`, если carteira не из списка банка.
    fn ensure_wallet(&self, wallet: &str) -> Result<()> {
        if self.supports_wallet(wallet) {
            Ok(())
        } else {
            Err(BoletoError::UnsupportedWalletCode {
                bank: self.code(),
                wallet: wallet.to_string(),
            })
        }
    }
}
