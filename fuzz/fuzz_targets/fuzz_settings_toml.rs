#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use rubicon::domain::ports::{CancelToken, ScanError, ToolchainScanner};
use rubicon::domain::value_objects::ToolchainVersion;
use rubicon::infrastructure::MemoryFs;
use rubicon::{CompilationSettings, RunSettings, SettingsDomain, ToolchainRegistry};

struct NoToolchains;

impl ToolchainScanner for NoToolchains {
    fn scan(&self, _cancel: &CancelToken) -> Result<Vec<ToolchainVersion>, ScanError> {
        Ok(Vec::new())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(document) = toml::from_str::<toml::Table>(content) else {
        return;
    };

    // Decoding a hand-edited record must never panic, and whatever loads
    // must survive validation and re-encoding.
    let registry = Arc::new(ToolchainRegistry::new(Arc::new(NoToolchains)));
    let mut domains: Vec<Box<dyn SettingsDomain>> = vec![
        Box::new(CompilationSettings::new(registry, Arc::new(MemoryFs::new())).with_base_dir("/p")),
        Box::new(RunSettings::new()),
    ];
    for domain in &mut domains {
        let record = document.get(domain.kind().record_key());
        let _ = domain.load(record);
        assert!(!domain.is_dirty());
        let _ = domain.validate();
        let encoded = domain.to_record();
        let _ = toml::to_string(&encoded);
    }
});
