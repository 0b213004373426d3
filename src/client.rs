//! Store client wiring for the browser: localStorage-backed sessions and a
//! Supabase client built from compile-time configuration.

use std::rc::Rc;

use pin_store::{MemorySessionStore, PinStoreClient, Session, SessionStore, StoreConfig, SupabaseBackend};

pub type SiteClient = PinStoreClient<SupabaseBackend>;

/// localStorage key holding the signed-in session
const SESSION_KEY: &str = "dotted-atlas.session";

fn window_local_storage() -> Option<web_sys::Storage> {
    let win = web_sys::window()?;
    match win.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            log::warn!("localStorage error: {:?}", e);
            None
        }
    }
}

/// Keeps the session across reloads. Storage failures are logged and treated
/// as "no session".
pub struct LocalStorageSessionStore {
    storage: web_sys::Storage,
}

impl LocalStorageSessionStore {
    /// `None` when the browser gives no storage (private mode, sandboxed iframe)
    pub fn open() -> Option<Self> {
        window_local_storage().map(|storage| Self { storage })
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Option<Session> {
        let raw = match self.storage.get_item(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("get_item(session) failed: {:?}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("stored session is corrupt, dropping it: {}", e);
                let _ = self.storage.remove_item(SESSION_KEY);
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        let raw = match serde_json::to_string(session) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("cannot serialize session: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(SESSION_KEY, &raw) {
            log::warn!("set_item(session) failed: {:?}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.storage.remove_item(SESSION_KEY) {
            log::warn!("remove_item(session) failed: {:?}", e);
        }
    }
}

/// Client for the configured project, or `None` when the build carries no
/// `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
pub fn build_client() -> Option<SiteClient> {
    let config = match StoreConfig::from_env_values(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY")) {
        Ok(config) => config,
        Err(e) => {
            log::error!("pin store disabled: {}", e);
            return None;
        }
    };
    let sessions: Rc<dyn SessionStore> = match LocalStorageSessionStore::open() {
        Some(store) => Rc::new(store),
        None => {
            log::warn!("localStorage unavailable, sessions last until reload");
            Rc::new(MemorySessionStore::new())
        }
    };
    log::info!("pin store at {}", config.url);
    let backend = SupabaseBackend::new(config, Rc::clone(&sessions));
    Some(PinStoreClient::new(backend, sessions))
}
