use serde::{Deserialize, Serialize};
use std::fmt;

/// Security types a network or configuration can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityType {
    Open,
    Owe,
    Wep,
    Psk,
    Sae,
    Eap,
    EapWpa3Enterprise,
    EapWpa3Enterprise192,
    WapiPsk,
    WapiCert,
    Unknown,
}

impl SecurityType {
    /// Join family of a single type.
    pub fn group(self) -> SecurityGroup {
        match self {
            Self::Open | Self::Owe => SecurityGroup::Open,
            Self::Psk | Self::Sae => SecurityGroup::Personal,
            Self::Eap | Self::EapWpa3Enterprise => SecurityGroup::Enterprise,
            Self::EapWpa3Enterprise192 => SecurityGroup::Enterprise192,
            Self::Wep => SecurityGroup::Wep,
            Self::WapiPsk => SecurityGroup::WapiPsk,
            Self::WapiCert => SecurityGroup::WapiCert,
            Self::Unknown => SecurityGroup::Unknown,
        }
    }
}

/// Collapsed security family used as part of a network identity.
///
/// Upgradable pairs (Open/OWE, PSK/SAE, EAP/EAP-WPA3) share a group so a saved
/// configuration keeps matching an access point that advertises the upgraded
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityGroup {
    Open,
    Wep,
    Personal,
    Enterprise,
    Enterprise192,
    WapiPsk,
    WapiCert,
    Unknown,
}

impl SecurityGroup {
    /// Collapse a list of security types supported by one network into a single group.
    pub fn from_types(types: &[SecurityType]) -> Self {
        match types {
            [] => Self::Unknown,
            [only] => only.group(),
            [first, second] => {
                let pair = [*first, *second];
                if pair.contains(&SecurityType::Open) {
                    Self::Open
                } else if pair.contains(&SecurityType::Psk) {
                    Self::Personal
                } else if pair.contains(&SecurityType::Eap) {
                    Self::Enterprise
                } else {
                    first.group()
                }
            }
            [first, ..] => first.group(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Wep => "wep",
            Self::Personal => "personal",
            Self::Enterprise => "enterprise",
            Self::Enterprise192 => "enterprise192",
            Self::WapiPsk => "wapi_psk",
            Self::WapiCert => "wapi_cert",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SecurityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the security types advertised by a raw scan capability string,
/// e.g. `[WPA2-PSK-CCMP][RSN-PSK+SAE-CCMP][ESS]`.
pub fn security_types_from_capabilities(caps: &str) -> Vec<SecurityType> {
    let has = |needle: &str| caps.contains(needle);

    let pmf_required = has("[MFPR]");
    let pmf_capable = has("[MFPC]");
    let legacy_cipher = has("WEP") || has("TKIP");

    let eap_suite_b = has("SUITE_B_192") && has("RSN") && !legacy_cipher && pmf_required;
    let wpa3_enterprise_transition = has("EAP/SHA1")
        && has("EAP/SHA256")
        && has("RSN")
        && !legacy_cipher
        && !pmf_required
        && pmf_capable;
    let wpa3_enterprise_only = has("EAP/SHA256")
        && !has("EAP/SHA1")
        && has("RSN")
        && !legacy_cipher
        && pmf_required
        && pmf_capable;
    let eap = (has("EAP/SHA1") || has("EAP/SHA256") || has("FT/EAP") || has("EAP-FILS"))
        && !wpa3_enterprise_only
        && !wpa3_enterprise_transition;
    let psk = has("PSK");
    let sae = has("SAE");
    let wep = has("WEP");
    let wapi_psk = has("WAPI-PSK");
    let wapi_cert = has("WAPI-CERT");

    let open = !(wep
        || psk
        || eap
        || sae
        || wpa3_enterprise_transition
        || wpa3_enterprise_only
        || wapi_psk
        || wapi_cert
        || eap_suite_b
        || has("?"));

    if has("OWE_TRANSITION") {
        return vec![SecurityType::Open, SecurityType::Owe];
    }
    if has("OWE") {
        return vec![SecurityType::Owe];
    }
    if open {
        return vec![SecurityType::Open];
    }
    if wep {
        return vec![SecurityType::Wep];
    }
    if wapi_psk {
        return vec![SecurityType::WapiPsk];
    }
    if wapi_cert {
        return vec![SecurityType::WapiCert];
    }
    match (psk, sae) {
        (true, true) => return vec![SecurityType::Psk, SecurityType::Sae],
        (true, false) => return vec![SecurityType::Psk],
        (false, true) => return vec![SecurityType::Sae],
        (false, false) => {}
    }

    if eap_suite_b {
        vec![SecurityType::EapWpa3Enterprise192]
    } else if wpa3_enterprise_transition {
        vec![SecurityType::Eap, SecurityType::EapWpa3Enterprise]
    } else if wpa3_enterprise_only {
        vec![SecurityType::EapWpa3Enterprise]
    } else if eap {
        vec![SecurityType::Eap]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_network_has_no_security_markers() {
        assert_eq!(security_types_from_capabilities("[ESS]"), vec![SecurityType::Open]);
        assert_eq!(security_types_from_capabilities(""), vec![SecurityType::Open]);
    }

    #[test]
    fn test_psk_sae_transition_collapses_to_personal() {
        let types = security_types_from_capabilities("[WPA2-PSK-CCMP][RSN-PSK+SAE-CCMP][ESS]");
        assert_eq!(types, vec![SecurityType::Psk, SecurityType::Sae]);
        assert_eq!(SecurityGroup::from_types(&types), SecurityGroup::Personal);
    }

    #[test]
    fn test_owe_transition_collapses_to_open() {
        let types = security_types_from_capabilities("[RSN-OWE_TRANSITION-CCMP][ESS]");
        assert_eq!(types, vec![SecurityType::Open, SecurityType::Owe]);
        assert_eq!(SecurityGroup::from_types(&types), SecurityGroup::Open);
    }

    #[test]
    fn test_enterprise_variants() {
        let transition =
            security_types_from_capabilities("[RSN-EAP/SHA1+EAP/SHA256-CCMP][MFPC][ESS]");
        assert_eq!(
            transition,
            vec![SecurityType::Eap, SecurityType::EapWpa3Enterprise]
        );

        let wpa3_only = security_types_from_capabilities("[RSN-EAP/SHA256-CCMP][MFPR][MFPC][ESS]");
        assert_eq!(wpa3_only, vec![SecurityType::EapWpa3Enterprise]);

        let suite_b = security_types_from_capabilities("[RSN-SUITE_B_192-GCMP-256][MFPR][ESS]");
        assert_eq!(suite_b, vec![SecurityType::EapWpa3Enterprise192]);

        let legacy = security_types_from_capabilities("[WPA2-EAP/SHA1-CCMP][ESS]");
        assert_eq!(legacy, vec![SecurityType::Eap]);
    }

    #[test]
    fn test_unknown_akm_yields_nothing() {
        assert!(security_types_from_capabilities("[RSN-?-CCMP][ESS]").is_empty());
        assert_eq!(SecurityGroup::from_types(&[]), SecurityGroup::Unknown);
    }

    #[test]
    fn test_wep_and_wapi() {
        assert_eq!(security_types_from_capabilities("[WEP][ESS]"), vec![SecurityType::Wep]);
        assert_eq!(
            security_types_from_capabilities("[WAPI-PSK-SMS4][ESS]"),
            vec![SecurityType::WapiPsk]
        );
    }
}
