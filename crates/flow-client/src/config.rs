//! Configuración del cliente desde variables de entorno.
//! Convención `FLOWDASH_*` con defaults; `.env` se carga una sola vez.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Tamaños de página de los dos streams. `timeline_limit` no debe cambiar
/// durante una sesión de reconciliación: la numeración ordinal depende de él.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub flow_limit: u32,
    pub timeline_limit: u32,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let flow_limit = env::var("FLOWDASH_FLOW_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(20);
        let timeline_limit = env::var("FLOWDASH_TIMELINE_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(50);
        Self { flow_limit, timeline_limit }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { flow_limit: 20, timeline_limit: 50 }
    }
}
