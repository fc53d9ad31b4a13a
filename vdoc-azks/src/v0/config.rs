use serde::{Deserialize, Serialize};
use vdoc_core::{Document, Meta, SchemaVersion, Validate, Validator};

/// Module configuration: what the AKS cluster should look like.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub meta: Option<Meta>,
    pub params: Option<Params>,
    #[serde(skip)]
    pub unused: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "rsa_pub_path")]
    pub rsa_public_key_path: Option<String>,
    pub rg_name: Option<String>,
    pub vnet_name: Option<String>,
    pub subnet_name: Option<String>,
    pub kubernetes_version: Option<String>,
    pub enable_node_public_ip: Option<bool>,
    pub enable_rbac: Option<bool>,
    pub default_node_pool: Option<DefaultNodePool>,
    pub auto_scaler_profile: Option<AutoScalerProfile>,
    /// Azure AD integration; disabled when absent
    pub azure_ad: Option<AzureAd>,
    pub identity_type: Option<String>,
    pub admin_username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultNodePool {
    /// Initial node count, between `min` and `max`
    pub size: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub vm_size: Option<String>,
    pub disk_gb_size: Option<i64>,
    pub auto_scaling: Option<bool>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// Cluster autoscaler tuning. Values are passed through to Azure as written,
/// so durations keep their string form (`10m`, `600`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoScalerProfile {
    pub balance_similar_node_groups: Option<bool>,
    pub max_graceful_termination_sec: Option<String>,
    pub scale_down_delay_after_add: Option<String>,
    pub scale_down_delay_after_delete: Option<String>,
    pub scale_down_delay_after_failure: Option<String>,
    pub scan_interval: Option<String>,
    pub scale_down_unneeded: Option<String>,
    pub scale_down_unready: Option<String>,
    pub scale_down_utilization_threshold: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureAd {
    pub managed: Option<bool>,
    pub tenant_id: Option<String>,
    pub admin_group_object_ids: Option<Vec<String>>,
}

const CONFIG_KINDS: &[&str] = &[Config::KIND];

impl Config {
    /// A configuration with the module's defaults. Not validated.
    pub fn init(module_version: &str) -> Self {
        Config {
            meta: Some(Meta::new(
                Self::KIND,
                Self::SCHEMA_VERSION,
                module_version,
            )),
            params: Some(Params {
                name: Some("epiphany".to_string()),
                location: Some("northeurope".to_string()),
                rsa_public_key_path: Some("/shared/vms_rsa.pub".to_string()),
                rg_name: Some("epiphany-rg".to_string()),
                vnet_name: Some("epiphany-vnet".to_string()),
                subnet_name: Some("azks".to_string()),
                kubernetes_version: Some("1.18.14".to_string()),
                enable_node_public_ip: Some(false),
                enable_rbac: Some(false),
                default_node_pool: Some(DefaultNodePool {
                    size: Some(2),
                    min: Some(2),
                    max: Some(5),
                    vm_size: Some("Standard_DS2_v2".to_string()),
                    disk_gb_size: Some(36),
                    auto_scaling: Some(true),
                    type_: Some("VirtualMachineScaleSets".to_string()),
                }),
                auto_scaler_profile: Some(AutoScalerProfile {
                    balance_similar_node_groups: Some(false),
                    max_graceful_termination_sec: Some("600".to_string()),
                    scale_down_delay_after_add: Some("10m".to_string()),
                    scale_down_delay_after_delete: Some("10s".to_string()),
                    scale_down_delay_after_failure: Some("10m".to_string()),
                    scan_interval: Some("10s".to_string()),
                    scale_down_unneeded: Some("10m".to_string()),
                    scale_down_unready: Some("10m".to_string()),
                    scale_down_utilization_threshold: Some("0.5".to_string()),
                }),
                azure_ad: None,
                identity_type: Some("SystemAssigned".to_string()),
                admin_username: Some("operations".to_string()),
            }),
            unused: vec![],
        }
    }
}

impl Document for Config {
    const NAME: &'static str = "Config";
    const KIND: &'static str = "azksConfig";
    const SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(0, 3, 0);

    fn unused(&self) -> &[String] {
        &self.unused
    }

    fn set_unused(&mut self, unused: Vec<String>) {
        self.unused = unused;
    }
}

impl Validate for Config {
    fn validate_into(&self, v: &mut Validator) {
        v.field("Meta", self.meta.as_ref())
            .required()
            .nested(|v, meta| meta.validate_into(v, CONFIG_KINDS, Config::SCHEMA_VERSION));
        v.field("Params", self.params.as_ref())
            .required()
            .nested(|v, params| params.validate_into(v));
    }
}

impl Validate for Params {
    fn validate_into(&self, v: &mut Validator) {
        v.field("Name", self.name.as_deref()).required().min(1);
        v.field("Location", self.location.as_deref())
            .required()
            .min(1);
        v.field("RsaPublicKeyPath", self.rsa_public_key_path.as_deref())
            .required()
            .min(1);
        v.field("RgName", self.rg_name.as_deref()).required().min(1);
        v.field("VnetName", self.vnet_name.as_deref())
            .required()
            .min(1);
        v.field("SubnetName", self.subnet_name.as_deref())
            .required()
            .min(1);
        v.field("KubernetesVersion", self.kubernetes_version.as_deref())
            .required()
            .min(1);
        v.field("EnableNodePublicIp", self.enable_node_public_ip)
            .required();
        v.field("EnableRbac", self.enable_rbac).required();
        v.field("DefaultNodePool", self.default_node_pool.as_ref())
            .required()
            .nested(|v, pool| pool.validate_into(v));
        v.field("AutoScalerProfile", self.auto_scaler_profile.as_ref())
            .required()
            .nested(|v, profile| profile.validate_into(v));
        v.field("AzureAd", self.azure_ad.as_ref())
            .nested(|v, ad| ad.validate_into(v));
        v.field("IdentityType", self.identity_type.as_deref())
            .required()
            .min(1);
        v.field("AdminUsername", self.admin_username.as_deref())
            .required()
            .min(1);
    }
}

impl Validate for DefaultNodePool {
    fn validate_into(&self, v: &mut Validator) {
        v.field("Size", self.size)
            .required()
            .min(0)
            .gte_field("Min", self.min)
            .lte_field("Max", self.max);
        v.field("Min", self.min).required().min(0);
        v.field("Max", self.max)
            .required()
            .min(0)
            .gte_field("Min", self.min);
        v.field("VmSize", self.vm_size.as_deref()).required().min(1);
        v.field("DiskGbSize", self.disk_gb_size).required().min(1);
        v.field("AutoScaling", self.auto_scaling).required();
        v.field("Type", self.type_.as_deref()).required().min(1);
    }
}

impl Validate for AutoScalerProfile {
    fn validate_into(&self, v: &mut Validator) {
        v.field("BalanceSimilarNodeGroups", self.balance_similar_node_groups)
            .required();
        for (name, value) in [
            ("MaxGracefulTerminationSec", &self.max_graceful_termination_sec),
            ("ScaleDownDelayAfterAdd", &self.scale_down_delay_after_add),
            ("ScaleDownDelayAfterDelete", &self.scale_down_delay_after_delete),
            ("ScaleDownDelayAfterFailure", &self.scale_down_delay_after_failure),
            ("ScanInterval", &self.scan_interval),
            ("ScaleDownUnneeded", &self.scale_down_unneeded),
            ("ScaleDownUnready", &self.scale_down_unready),
            (
                "ScaleDownUtilizationThreshold",
                &self.scale_down_utilization_threshold,
            ),
        ] {
            v.field(name, value.as_deref()).required().min(1);
        }
    }
}

impl Validate for AzureAd {
    fn validate_into(&self, v: &mut Validator) {
        v.field("Managed", self.managed).required();
        v.field("TenantId", self.tenant_id.as_deref())
            .required()
            .min(1);
        v.field("AdminGroupObjectIds", self.admin_group_object_ids.as_deref())
            .required()
            .min(1)
            .dive(|id| {
                id.non_empty().min(1);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};
    use vdoc_core::{Error, Rule};

    const DEFAULT_JSON: &str = include_str!("../../fixtures/v0/config-default.json");
    const FULL_JSON: &str = include_str!("../../fixtures/v0/config-full.json");
    const UNKNOWN_FIELDS_JSON: &str = include_str!("../../fixtures/v0/config-unknown-fields.json");

    fn write_fixture(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, json).unwrap();
        path
    }

    fn load_str(json: &str) -> Result<Config, Error> {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, json);
        let mut config = Config::default();
        config.load(&path).map(|()| config)
    }

    /// Violations as sorted `(path, tag)` pairs.
    fn violations(result: Result<(), Error>) -> Vec<(String, &'static str)> {
        let err = result.unwrap_err();
        let mut found: Vec<_> = err
            .violations()
            .unwrap_or_else(|| panic!("expected violations, got {:?}", err))
            .iter()
            .map(|v| (v.path.clone(), v.rule.tag()))
            .collect();
        found.sort();
        found
    }

    fn expect(pairs: &[(&str, &'static str)]) -> Vec<(String, &'static str)> {
        let mut expected: Vec<_> = pairs
            .iter()
            .map(|(path, tag)| (path.to_string(), *tag))
            .collect();
        expected.sort();
        expected
    }

    fn params(config: &mut Config) -> &mut Params {
        config.params.as_mut().unwrap()
    }

    fn pool(config: &mut Config) -> &mut DefaultNodePool {
        params(config).default_node_pool.as_mut().unwrap()
    }

    fn with_azure_ad() -> Config {
        let mut config = Config::init("v1.1.1");
        params(&mut config).azure_ad = Some(AzureAd {
            managed: Some(true),
            tenant_id: Some("123123123123".to_string()),
            admin_group_object_ids: Some(vec!["123123123123".to_string()]),
        });
        config
    }

    #[test]
    fn test_init() {
        let config = Config::init("v0.0.1");
        let meta = config.meta.as_ref().unwrap();
        assert_eq!(meta.kind.as_deref(), Some("azksConfig"));
        assert_eq!(meta.version.as_deref(), Some("v0.3.0"));
        assert_eq!(meta.module_version.as_deref(), Some("v0.0.1"));
        assert!(config.unused.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup-file.json");
        Config::default().backup(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n\t\"meta\": null,\n\t\"params\": null\n}"
        );
    }

    #[test]
    fn test_backup_file_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup-file.json");
        fs::write(&path, "content").unwrap();
        let err = Config::default().backup(&path).unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_load() {
        assert_eq!(load_str(FULL_JSON).unwrap(), with_azure_ad());
    }

    #[test]
    fn test_load_unknown_fields_in_multiple_places() {
        let config = load_str(UNKNOWN_FIELDS_JSON).unwrap();
        assert_eq!(
            config.unused,
            vec!["params.extra_inner_field", "extra_outer_field"]
        );
        let mut expected = Config::init("v1.1.1");
        expected.unused = config.unused.clone();
        assert_eq!(config, expected);
    }

    #[test]
    fn test_load_performs_validation() {
        let result = load_str(
            r#"{
	"meta": {
		"kind": "azksConfig",
		"version": "v0.3.0",
		"module_version": "v0.0.1"
	}
}"#,
        );
        assert_eq!(
            violations(result.map(|_| ())),
            expect(&[("Config.Params", "required")])
        );
    }

    #[test]
    fn test_load_missing_or_null_azure_ad() {
        let mut missing: serde_json::Value = serde_json::from_str(DEFAULT_JSON).unwrap();
        missing["params"]
            .as_object_mut()
            .unwrap()
            .remove("azure_ad");
        let config = load_str(&missing.to_string()).unwrap();
        assert_eq!(config.params.as_ref().unwrap().azure_ad, None);
        assert!(config.unused.is_empty());

        let config = load_str(DEFAULT_JSON).unwrap();
        assert_eq!(config, Config::init("v0.0.1"));
    }

    #[test]
    fn test_load_other_schema_series() {
        for version in ["v0.2.0", "v0.4.0", "v1.3.0", "v100.0.0"] {
            let json = DEFAULT_JSON.replace("\"v0.3.0\"", &format!("\"{}\"", version));
            match load_str(&json) {
                Err(Error::NotCurrentVersion { version: v }) => assert_eq!(v, version),
                other => panic!("unexpected result for {}: {:?}", version, other),
            }
        }
    }

    #[test]
    fn test_load_other_series_with_changed_field_types() {
        let json = DEFAULT_JSON
            .replace("\"v0.3.0\"", "\"v0.2.0\"")
            .replace("\"size\": 2,", "\"size\": \"2\",");
        match load_str(&json) {
            Err(Error::NotCurrentVersion { version }) => assert_eq!(version, "v0.2.0"),
            other => panic!("unexpected result: {:?}", other),
        }

        // the same shape in the current series is a decoding error at the field
        let json = DEFAULT_JSON.replace("\"size\": 2,", "\"size\": \"2\",");
        match load_str(&json) {
            Err(Error::Decode { path, .. }) => assert_eq!(path, "params.default_node_pool.size"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_ignores_patch_level() {
        let json = DEFAULT_JSON.replace("\"v0.3.0\"", "\"v0.3.11\"");
        let config = load_str(&json).unwrap();
        assert_eq!(
            config.meta.unwrap().version.as_deref(),
            Some("v0.3.11")
        );
    }

    #[test]
    fn test_failed_load_keeps_receiver() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, r#"{"meta": null, "params": {}}"#);
        let mut config = Config::init("v0.0.1");
        assert!(config.load(&path).is_err());
        assert_eq!(config, Config::init("v0.0.1"));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        Config::init("v0.0.1").save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_JSON.trim_end());
    }

    #[test]
    fn test_save_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        assert_eq!(
            violations(Config::default().save(&path)),
            expect(&[("Config.Meta", "required"), ("Config.Params", "required")])
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        let config = with_azure_ad();
        config.save(&path).unwrap();
        let mut loaded = Config::default();
        loaded.load(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(config.save(&path).unwrap_err().is_already_exists());
    }

    #[test]
    fn test_print() {
        let printed = Config::init("v0.0.1").print().unwrap();
        assert_eq!(String::from_utf8(printed).unwrap(), DEFAULT_JSON.trim_end());
        assert_eq!(
            violations(Config::default().print().map(|_| ())),
            expect(&[("Config.Meta", "required"), ("Config.Params", "required")])
        );
    }

    #[test]
    fn test_valid_empty_struct() {
        assert_eq!(
            violations(Config::default().validate()),
            expect(&[("Config.Meta", "required"), ("Config.Params", "required")])
        );
    }

    #[test]
    fn test_valid_meta_missing() {
        let mut config = Config::init("v0.0.1");
        config.meta = None;
        assert_eq!(
            violations(config.validate()),
            expect(&[("Config.Meta", "required")])
        );
    }

    #[test]
    fn test_valid_meta_of_other_kind() {
        let mut config = Config::init("v0.0.1");
        config.meta.as_mut().unwrap().kind = Some("azksState".to_string());
        let err = config.validate().unwrap_err();
        let violation = err.violations().unwrap().get("Config.Meta.Kind").unwrap();
        assert_eq!(violation.rule, Rule::OneOf(&["azksConfig"]));
        assert_eq!(violation.rule.to_string(), "eq=azksConfig");
    }

    #[test]
    fn test_valid_missing_params() {
        let mut config = Config::init("v0.0.1");
        config.params = None;
        assert_eq!(
            violations(config.validate()),
            expect(&[("Config.Params", "required")])
        );
    }

    #[test]
    fn test_valid_empty_params() {
        let mut config = Config::init("v0.0.1");
        config.params = Some(Params::default());
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.Name", "required"),
                ("Config.Params.Location", "required"),
                ("Config.Params.RsaPublicKeyPath", "required"),
                ("Config.Params.RgName", "required"),
                ("Config.Params.VnetName", "required"),
                ("Config.Params.SubnetName", "required"),
                ("Config.Params.KubernetesVersion", "required"),
                ("Config.Params.EnableNodePublicIp", "required"),
                ("Config.Params.EnableRbac", "required"),
                ("Config.Params.DefaultNodePool", "required"),
                ("Config.Params.AutoScalerProfile", "required"),
                ("Config.Params.IdentityType", "required"),
                ("Config.Params.AdminUsername", "required"),
            ])
        );
    }

    #[test]
    fn test_valid_empty_param_values() {
        let mut config = Config::init("v0.0.1");
        let empty = || Some(String::new());
        {
            let params = params(&mut config);
            params.name = empty();
            params.location = empty();
            params.rsa_public_key_path = empty();
            params.rg_name = empty();
            params.vnet_name = empty();
            params.subnet_name = empty();
            params.kubernetes_version = empty();
            params.identity_type = empty();
            params.admin_username = empty();
            let pool = params.default_node_pool.as_mut().unwrap();
            pool.vm_size = empty();
            pool.type_ = empty();
            params.auto_scaler_profile = Some(AutoScalerProfile {
                balance_similar_node_groups: Some(false),
                max_graceful_termination_sec: empty(),
                scale_down_delay_after_add: empty(),
                scale_down_delay_after_delete: empty(),
                scale_down_delay_after_failure: empty(),
                scan_interval: empty(),
                scale_down_unneeded: empty(),
                scale_down_unready: empty(),
                scale_down_utilization_threshold: empty(),
            });
        }
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.Name", "min"),
                ("Config.Params.Location", "min"),
                ("Config.Params.RsaPublicKeyPath", "min"),
                ("Config.Params.RgName", "min"),
                ("Config.Params.VnetName", "min"),
                ("Config.Params.SubnetName", "min"),
                ("Config.Params.KubernetesVersion", "min"),
                ("Config.Params.IdentityType", "min"),
                ("Config.Params.AdminUsername", "min"),
                ("Config.Params.DefaultNodePool.VmSize", "min"),
                ("Config.Params.DefaultNodePool.Type", "min"),
                ("Config.Params.AutoScalerProfile.MaxGracefulTerminationSec", "min"),
                ("Config.Params.AutoScalerProfile.ScaleDownDelayAfterAdd", "min"),
                ("Config.Params.AutoScalerProfile.ScaleDownDelayAfterDelete", "min"),
                ("Config.Params.AutoScalerProfile.ScaleDownDelayAfterFailure", "min"),
                ("Config.Params.AutoScalerProfile.ScanInterval", "min"),
                ("Config.Params.AutoScalerProfile.ScaleDownUnneeded", "min"),
                ("Config.Params.AutoScalerProfile.ScaleDownUnready", "min"),
                ("Config.Params.AutoScalerProfile.ScaleDownUtilizationThreshold", "min"),
            ])
        );
    }

    #[test]
    fn test_valid_version_series() {
        for (version, ok) in [
            ("v0.3.0", true),
            ("v0.3.5", true),
            ("v0.2.0", false),
            ("v0.4.0", false),
            ("v1.3.0", false),
            ("0.3.0", false),
        ] {
            let mut config = Config::init("v0.0.1");
            config.meta.as_mut().unwrap().version = Some(version.to_string());
            if ok {
                assert!(config.validate().is_ok(), "{}", version);
            } else {
                assert_eq!(
                    violations(config.validate()),
                    expect(&[("Config.Meta.Version", "version")]),
                    "{}",
                    version
                );
            }
        }
    }

    #[test]
    fn test_valid_empty_azure_ad() {
        let mut config = Config::init("v1.1.1");
        params(&mut config).azure_ad = Some(AzureAd::default());
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.AzureAd.Managed", "required"),
                ("Config.Params.AzureAd.TenantId", "required"),
                ("Config.Params.AzureAd.AdminGroupObjectIds", "required"),
            ])
        );
    }

    #[test]
    fn test_valid_empty_azure_ad_params() {
        let mut config = with_azure_ad();
        {
            let ad = params(&mut config).azure_ad.as_mut().unwrap();
            ad.tenant_id = Some(String::new());
            ad.admin_group_object_ids = Some(vec![]);
        }
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.AzureAd.TenantId", "min"),
                ("Config.Params.AzureAd.AdminGroupObjectIds", "min"),
            ])
        );
    }

    #[test]
    fn test_valid_empty_admin_group_object_id() {
        let mut config = with_azure_ad();
        params(&mut config)
            .azure_ad
            .as_mut()
            .unwrap()
            .admin_group_object_ids = Some(vec!["".to_string()]);
        let err = config.validate().unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations.len(), 1);
        let violation = violations
            .get("Config.Params.AzureAd.AdminGroupObjectIds[0]")
            .unwrap();
        assert_eq!(violation.field, "AdminGroupObjectIds[0]");
        assert_eq!(violation.rule, Rule::Required);
    }

    #[test]
    fn test_valid_missing_blocks() {
        let mut config = Config::init("v0.0.1");
        params(&mut config).auto_scaler_profile = None;
        assert_eq!(
            violations(config.validate()),
            expect(&[("Config.Params.AutoScalerProfile", "required")])
        );

        let mut config = Config::init("v0.0.1");
        params(&mut config).default_node_pool = None;
        assert_eq!(
            violations(config.validate()),
            expect(&[("Config.Params.DefaultNodePool", "required")])
        );
    }

    #[test]
    fn test_valid_empty_auto_scaler_profile() {
        let mut config = Config::init("v0.0.1");
        params(&mut config).auto_scaler_profile = Some(AutoScalerProfile::default());
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.AutoScalerProfile.BalanceSimilarNodeGroups", "required"),
                ("Config.Params.AutoScalerProfile.MaxGracefulTerminationSec", "required"),
                ("Config.Params.AutoScalerProfile.ScaleDownDelayAfterAdd", "required"),
                ("Config.Params.AutoScalerProfile.ScaleDownDelayAfterDelete", "required"),
                ("Config.Params.AutoScalerProfile.ScaleDownDelayAfterFailure", "required"),
                ("Config.Params.AutoScalerProfile.ScanInterval", "required"),
                ("Config.Params.AutoScalerProfile.ScaleDownUnneeded", "required"),
                ("Config.Params.AutoScalerProfile.ScaleDownUnready", "required"),
                ("Config.Params.AutoScalerProfile.ScaleDownUtilizationThreshold", "required"),
            ])
        );
    }

    #[test]
    fn test_valid_empty_default_node_pool() {
        let mut config = Config::init("v0.0.1");
        params(&mut config).default_node_pool = Some(DefaultNodePool::default());
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.DefaultNodePool.Size", "required"),
                ("Config.Params.DefaultNodePool.Min", "required"),
                ("Config.Params.DefaultNodePool.Max", "required"),
                ("Config.Params.DefaultNodePool.VmSize", "required"),
                ("Config.Params.DefaultNodePool.DiskGbSize", "required"),
                ("Config.Params.DefaultNodePool.AutoScaling", "required"),
                ("Config.Params.DefaultNodePool.Type", "required"),
            ])
        );
    }

    #[test]
    fn test_valid_empty_default_node_pool_values() {
        let mut config = Config::init("v0.0.1");
        {
            let pool = pool(&mut config);
            pool.vm_size = Some(String::new());
            pool.disk_gb_size = Some(0);
            pool.type_ = Some(String::new());
        }
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.DefaultNodePool.VmSize", "min"),
                ("Config.Params.DefaultNodePool.DiskGbSize", "min"),
                ("Config.Params.DefaultNodePool.Type", "min"),
            ])
        );
    }

    #[test]
    fn test_valid_default_node_pool_sizes() {
        let cases: &[((i64, i64, i64), &[(&str, &'static str)])] = &[
            ((2, 2, 5), &[]),
            ((0, 0, 0), &[]),
            ((5, 2, 5), &[]),
            (
                (3, 3, 2),
                &[
                    ("Config.Params.DefaultNodePool.Max", "gtefield"),
                    ("Config.Params.DefaultNodePool.Size", "ltefield"),
                ],
            ),
            ((1, 2, 5), &[("Config.Params.DefaultNodePool.Size", "gtefield")]),
            ((6, 2, 5), &[("Config.Params.DefaultNodePool.Size", "ltefield")]),
            (
                (-1, -1, -1),
                &[
                    ("Config.Params.DefaultNodePool.Min", "min"),
                    ("Config.Params.DefaultNodePool.Max", "min"),
                    ("Config.Params.DefaultNodePool.Size", "min"),
                ],
            ),
        ];
        for ((size, min, max), expected) in cases {
            let mut config = Config::init("v0.0.1");
            {
                let pool = pool(&mut config);
                pool.size = Some(*size);
                pool.min = Some(*min);
                pool.max = Some(*max);
            }
            let result = config.validate();
            if expected.is_empty() {
                assert!(result.is_ok(), "{:?}: {:?}", (size, min, max), result);
            } else {
                assert_eq!(
                    violations(result),
                    expect(expected),
                    "{:?}",
                    (size, min, max)
                );
            }
        }
    }

    #[test]
    fn test_valid_missing_default_node_pool_min() {
        let mut config = Config::init("v0.0.1");
        params(&mut config).default_node_pool = Some(DefaultNodePool {
            vm_size: Some("Standard_DS2_v2".to_string()),
            type_: Some("VirtualMachineScaleSets".to_string()),
            ..Default::default()
        });
        assert_eq!(
            violations(config.validate()),
            expect(&[
                ("Config.Params.DefaultNodePool.Min", "required"),
                ("Config.Params.DefaultNodePool.Max", "required"),
                ("Config.Params.DefaultNodePool.Size", "required"),
                ("Config.Params.DefaultNodePool.DiskGbSize", "required"),
                ("Config.Params.DefaultNodePool.AutoScaling", "required"),
            ])
        );
    }

    #[test]
    fn test_upgrade_current_document_is_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, FULL_JSON);
        let mut upgraded = Config::default();
        upgraded.upgrade(&path).unwrap();
        let mut loaded = Config::default();
        loaded.load(&path).unwrap();
        assert_eq!(upgraded, loaded);
        assert_eq!(upgraded.print().unwrap(), loaded.print().unwrap());
    }

    #[test]
    fn test_upgrade_stale_document_has_no_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, &DEFAULT_JSON.replace("\"v0.3.0\"", "\"v0.2.0\""));
        let mut config = Config::init("v0.0.1");
        match config.upgrade(&path) {
            Err(Error::NoUpgradePath { kind, version }) => {
                assert_eq!(kind, "azksConfig");
                assert_eq!(version, "v0.2.0");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(config, Config::init("v0.0.1"));
    }

    #[test]
    fn test_upgrade_newer_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, &DEFAULT_JSON.replace("\"v0.3.0\"", "\"v0.4.0\""));
        assert!(matches!(
            Config::default().upgrade(&path),
            Err(Error::NotCurrentVersion { .. })
        ));
    }
}
