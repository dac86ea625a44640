//! WebGL Extensions
//!
//! Only `WEBGL_lose_context` is available; its methods are recorded.

use crate::literal::{self, string_arg, ARG_SEPARATOR_SPACED};
use crate::log::OpLog;

/// `WEBGL_lose_context`
#[derive(Debug, Clone)]
pub struct LoseContextExtension {
    context: String,
    log: OpLog,
}

impl LoseContextExtension {
    pub const NAME: &'static str = "WEBGL_lose_context";

    pub(crate) fn new(context: &str, log: OpLog) -> Self {
        Self {
            context: context.to_string(),
            log,
        }
    }

    pub fn lose_context(&self) {
        self.record("loseContext");
    }

    pub fn restore_context(&self) {
        self.record("restoreContext");
    }

    fn record(&self, method: &str) {
        let target = format!("{}.getExtension({})", self.context, string_arg(Self::NAME));
        self.log.append(literal::call(&target, method, &[], ARG_SEPARATOR_SPACED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lose_and_restore() {
        let log = OpLog::new();
        let ext = LoseContextExtension::new("_cgl2", log.clone());
        ext.lose_context();
        ext.restore_context();
        assert_eq!(
            log.statements(),
            vec![
                "_cgl2.getExtension('WEBGL_lose_context').loseContext();",
                "_cgl2.getExtension('WEBGL_lose_context').restoreContext();",
            ]
        );
    }
}
