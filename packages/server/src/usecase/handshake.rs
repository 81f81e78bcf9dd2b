//! UseCase: 名前登録のハンドシェイク
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - NameHandshake::negotiate() メソッド
//! - 文字種違反・重複時の再入力ループ
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の入力で登録成功
//! - 異常系：不正な名前、使用中の名前のあとに登録成功
//! - エッジケース：名前を決める前に切断

use std::sync::Arc;

use crate::domain::{ClientHandle, ClientRegistry, MessageFormatter, RegistryError, UserName};

use super::{error::HandshakeError, line_source::LineSource};

/// Negotiates a valid, unused display name for one connection
pub struct NameHandshake {
    registry: Arc<dyn ClientRegistry>,
}

impl NameHandshake {
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Read candidate names until one registers.
    ///
    /// Rejections are answered on `handle.sink` with a notice followed by the
    /// name prompt. There is no timeout; the loop only ends on success or on
    /// disconnect, and nothing is registered in the latter case.
    pub async fn negotiate(
        &self,
        lines: &mut dyn LineSource,
        handle: &ClientHandle,
    ) -> Result<UserName, HandshakeError> {
        loop {
            let Some(candidate) = lines.next_line().await? else {
                return Err(HandshakeError::Disconnected);
            };

            let notice = match self.registry.register(candidate, handle.clone()).await {
                Ok(name) => return Ok(name),
                Err(RegistryError::NameInvalid(name)) => {
                    tracing::info!("Rejected invalid user name {:?}", name);
                    MessageFormatter::invalid_name()
                }
                Err(RegistryError::NameTaken(name)) => {
                    tracing::info!("Rejected user name '{}': already taken", name);
                    MessageFormatter::name_taken()
                }
            };

            if handle.sink.send(notice).is_err() {
                return Err(HandshakeError::Disconnected);
            }
        }
    }
}
