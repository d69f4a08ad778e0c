// ── Hardware name normalizer ──
//
// Foundry agents report hardware as the sysObjectID's MIB label
// (`snICX645048Switch`). The table maps known labels to the marketing
// names; anything else goes through a pattern rewrite or is returned
// as-is.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static HARDWARE_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // FCX
        ("snFCX624SSwitch", "FCX624S"),
        ("snFCX624Switch", "FCX624"),
        ("snFCX624SHPOESwitch", "FCX624S PoE+"),
        ("snFCX648SSwitch", "FCX648S"),
        ("snFCX648Switch", "FCX648"),
        ("snFCX648SHPOESwitch", "FCX648S PoE+"),
        ("snFastIronStackFCXSwitch", "FCX Stack"),
        // ICX 6430
        ("snICX643024Switch", "ICX6430-24"),
        ("snICX643024HPOESwitch", "ICX6430-24 PoE+"),
        ("snICX643048Switch", "ICX6430-48"),
        ("snICX643048HPOESwitch", "ICX6430-48 PoE+"),
        ("snICX6430C12Switch", "ICX6430-C12"),
        ("snFastIronStackICX6430Switch", "ICX6430 Stack"),
        // ICX 6450
        ("snICX645024Switch", "ICX6450-24"),
        ("snICX645024HPOESwitch", "ICX6450-24 PoE+"),
        ("snICX645048Switch", "ICX6450-48"),
        ("snICX645048HPOESwitch", "ICX6450-48 PoE+"),
        ("snICX6450C12PDSwitch", "ICX6450-C12-PD"),
        ("snFastIronStackICX6450Switch", "ICX6450 Stack"),
        // ICX 6610
        ("snICX661024Switch", "ICX6610-24"),
        ("snICX661024HPOESwitch", "ICX6610-24 PoE+"),
        ("snICX661024FSwitch", "ICX6610-24F"),
        ("snICX661048Switch", "ICX6610-48"),
        ("snICX661048HPOESwitch", "ICX6610-48 PoE+"),
        ("snFastIronStackICX6610Switch", "ICX6610 Stack"),
        // ICX 6650
        ("snICX665064Switch", "ICX6650-64"),
        // ICX 7150
        ("snICX715024Switch", "ICX7150-24"),
        ("snICX715024POESwitch", "ICX7150-24 PoE+"),
        ("snICX715024FSwitch", "ICX7150-24F"),
        ("snICX715048Switch", "ICX7150-48"),
        ("snICX715048POESwitch", "ICX7150-48 PoE+"),
        ("snICX7150C12POESwitch", "ICX7150-C12 PoE+"),
        ("snICX7150C08PSwitch", "ICX7150-C08 PoE+"),
        ("snFastIronStackICX7150Switch", "ICX7150 Stack"),
        // ICX 7250
        ("snICX725024Switch", "ICX7250-24"),
        ("snICX725024HPOESwitch", "ICX7250-24 PoE+"),
        ("snICX725024GSwitch", "ICX7250-24G"),
        ("snICX725048Switch", "ICX7250-48"),
        ("snICX725048HPOESwitch", "ICX7250-48 PoE+"),
        ("snFastIronStackICX7250Switch", "ICX7250 Stack"),
        // ICX 7450
        ("snICX745024Switch", "ICX7450-24"),
        ("snICX745024HPOESwitch", "ICX7450-24 PoE+"),
        ("snICX745048Switch", "ICX7450-48"),
        ("snICX745048HPOESwitch", "ICX7450-48 PoE+"),
        ("snICX745048FSwitch", "ICX7450-48F"),
        ("snFastIronStackICX7450Switch", "ICX7450 Stack"),
        // ICX 7750
        ("snICX775026QSwitch", "ICX7750-26Q"),
        ("snICX775048CSwitch", "ICX7750-48C"),
        ("snICX775048FSwitch", "ICX7750-48F"),
        ("snFastIronStackICX7750Switch", "ICX7750 Stack"),
        // Mixed
        ("snFastIronStackMixedStackSwitch", "Mixed Stack"),
    ])
});

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^sn(FastIronStack)?([A-Za-z0-9]+?)Switch$").expect("Invalid regex pattern")
});

/// Exact table lookup.
pub fn lookup(raw: &str) -> Option<&'static str> {
    HARDWARE_NAMES.get(raw.trim()).copied()
}

/// Friendly hardware name for a raw Foundry hardware label.
///
/// Unlisted labels of the form `sn<model>Switch` lose the prefix and
/// suffix; the `FastIronStack` infix becomes a trailing ` Stack`.
pub fn normalize_hardware(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(name) = lookup(raw) {
        return name.to_owned();
    }
    match LABEL_PATTERN.captures(raw) {
        Some(caps) => {
            let model = caps.get(2).map_or("", |m| m.as_str());
            if caps.get(1).is_some() {
                format!("{model} Stack")
            } else {
                model.to_owned()
            }
        }
        None => raw.to_owned(),
    }
}
