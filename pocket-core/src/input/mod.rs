mod mock;
mod provider;

pub use mock::ScriptedInput;
pub use provider::InputSource;
