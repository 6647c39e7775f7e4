pub mod excerpt_controller;
pub mod settings_controller;
pub mod system_controller;
