//! # Runtime Configuration
//!
//! Environment-style configuration flowing into a wired container.

#[cfg(test)]
mod tests {
    use crate::fixtures::{admin, new_quote, new_shipment, subject};
    use hs_01_identifiers::IdentifierConfigError;
    use hs_02_shipment_ledger::ShipmentLedgerApi;
    use hs_03_quote_ledger::QuoteLedgerApi;
    use hs_05_api_gateway::ConfigError as GatewayConfigError;
    use shipping_runtime::{ConfigError, RuntimeConfig, ShippingContainer, StorageBackend};
    use shared_types::SubjectId;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<RuntimeConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_gives_valid_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.identifiers.tracking_prefix.as_str(), "HS");
        assert_eq!(config.identifiers.quote_prefix.as_str(), "HQ");
        assert_eq!(config.notifier.quotes_mailbox, "quotes@heritageshipping.com");
    }

    #[test]
    fn test_production_requires_admin_key() {
        let config = config_from(&[]).unwrap();
        assert!(matches!(
            config.validate_for_production(),
            Err(ConfigError::MissingAdminApiKey)
        ));

        let config = config_from(&[("HS_ADMIN_API_KEY", "s3cret")]).unwrap();
        assert!(config.validate_for_production().is_ok());
    }

    #[test]
    fn test_rejections() {
        let shared_port = config_from(&[("HS_HTTP_PORT", "9000"), ("HS_ADMIN_PORT", "9000")]).unwrap();
        assert!(matches!(
            shared_port.validate(),
            Err(ConfigError::Gateway(GatewayConfigError::DuplicatePorts))
        ));

        let same_prefix =
            config_from(&[("HS_TRACKING_PREFIX", "HQ"), ("HS_QUOTE_PREFIX", "HQ")]).unwrap();
        assert!(matches!(
            same_prefix.validate(),
            Err(ConfigError::Identifiers(IdentifierConfigError::SamePrefixes(_)))
        ));

        let no_attempts = config_from(&[("HS_ID_MAX_ATTEMPTS", "0")]).unwrap();
        assert!(matches!(
            no_attempts.validate(),
            Err(ConfigError::Identifiers(IdentifierConfigError::ZeroAttempts))
        ));

        assert!(matches!(
            config_from(&[("HS_HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidVar { var: "HS_HTTP_PORT", .. })
        ));
        assert!(config_from(&[("HS_TRACKING_PREFIX", "hs1")]).is_err());
    }

    #[tokio::test]
    async fn test_container_uses_configured_prefixes() {
        let config = config_from(&[
            ("HS_TRACKING_PREFIX", "TR"),
            ("HS_QUOTE_PREFIX", "QT"),
            ("HS_SUBJECT_TOKENS", "tok-u=u"),
        ])
        .unwrap();
        config.validate().unwrap();
        let container = ShippingContainer::new(config).unwrap();

        let shipment = container
            .shipments
            .create(&admin(), new_shipment(Some("u")))
            .await
            .unwrap();
        let quote = container
            .quotes
            .create(new_quote(), &SubjectId::new("u"))
            .await
            .unwrap();

        assert!(shipment.tracking_number.as_str().starts_with("TR"));
        assert!(quote.quote_number.as_str().starts_with("QT"));
        assert_eq!(shipment.tracking_number.as_str().len(), 10);

        let tracked = container
            .shipments
            .get(&subject("u"), shipment.tracking_number.as_str())
            .await
            .unwrap();
        assert_eq!(tracked.shipment, shipment);
    }
}
