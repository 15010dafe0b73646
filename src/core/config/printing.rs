use crate::core::config::data::{mask_secret, Config};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match self.stored_api_key() {
            Some(key) => println!("  api-key: {}", mask_secret(key)),
            None => println!("  api-key: (placeholder or unset)"),
        }
        println!("  model: {}", self.model());
        println!("  base-url: {}", self.base_url());
        println!("  assistant-name: {}", self.assistant_name());
        println!("  title: {}", self.window_title());
        let (width, height) = self.window_size();
        println!("  window: {width}x{height}");
    }
}
