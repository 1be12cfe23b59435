//! Bundled provider samples for `nimbus register`.
//!
//! Responsibilities:
//! - Embed the sample entries shipped with the CLI.
//! - Expose lookup by service and kind.
//!
//! Invariants:
//! - Attribute slots are quoted "{attribute}" strings, so every sample is
//!   itself valid YAML before filling.
//! - Filled entries contain no braces, otherwise the next load would treat
//!   leftovers as unresolvable placeholders.

/// One bundled sample: the service it belongs to, the provider kind, and
/// the YAML entry with quoted attribute slots.
pub(crate) struct Sample {
    pub service: &'static str,
    pub kind: &'static str,
    pub entry: &'static str,
}

pub(crate) const SAMPLES: &[Sample] = &[
    Sample {
        service: "cloud",
        kind: "openstack",
        entry: r#"cm:
  active: true
  heading: OpenStack
  host: "{OS_AUTH_URL}"
  kind: openstack
  label: "{name}"
  version: train
default:
  image: Ubuntu 22.04
  size: m1.small
  flavor: m1.small
credentials:
  OS_AUTH_URL: "{OS_AUTH_URL}"
  OS_USERNAME: "{OS_USERNAME}"
  OS_PASSWORD: "{OS_PASSWORD}"
  OS_PROJECT_NAME: "{OS_PROJECT_NAME}"
"#,
    },
    Sample {
        service: "cloud",
        kind: "aws",
        entry: r#"cm:
  active: true
  heading: AWS
  host: aws.amazon.com
  kind: aws
  label: "{name}"
  version: TBD
default:
  image: ami-0c929bde1796e1484
  size: t2.micro
credentials:
  region: "{region}"
  EC2_ACCESS_ID: "{EC2_ACCESS_ID}"
  EC2_SECRET_KEY: "{EC2_SECRET_KEY}"
"#,
    },
    Sample {
        service: "cloud",
        kind: "azure",
        entry: r#"cm:
  active: true
  heading: Azure
  host: azure.microsoft.com
  kind: azure
  label: "{name}"
  version: latest
default:
  image: Canonical:0001-com-ubuntu-server-jammy:22_04-lts:latest
  size: Standard_B1s
credentials:
  AZURE_TENANT_ID: "{AZURE_TENANT_ID}"
  AZURE_SUBSCRIPTION_ID: "{AZURE_SUBSCRIPTION_ID}"
  AZURE_APPLICATION_ID: "{AZURE_APPLICATION_ID}"
  AZURE_SECRET_KEY: "{AZURE_SECRET_KEY}"
  AZURE_REGION: "{location}"
  resourcegroup: "{resourcegroup}"
"#,
    },
    Sample {
        service: "cloud",
        kind: "google",
        entry: r#"cm:
  active: true
  heading: Google
  host: cloud.google.com
  kind: google
  label: "{name}"
  version: v1
default:
  image: ubuntu-2204-lts
  size: e2-small
  zone: us-central1-a
credentials:
  project_id: "{project_id}"
  client_email: "{client_email}"
  filename: "{filename}"
"#,
    },
    Sample {
        service: "cloud",
        kind: "oracle",
        entry: r#"cm:
  active: true
  heading: Oracle
  host: cloud.oracle.com
  kind: oracle
  label: "{name}"
  version: latest
default:
  image: Oracle-Linux-8
  size: VM.Standard.E2.1.Micro
credentials:
  user: "{user}"
  fingerprint: "{fingerprint}"
  key_file: "{key_file}"
  tenancy: "{tenancy}"
  region: "{region}"
"#,
    },
    Sample {
        service: "storage",
        kind: "aws",
        entry: r#"cm:
  active: true
  heading: AWS S3
  host: s3.amazonaws.com
  kind: aws
  label: "{name}"
  version: TBD
default:
  directory: /
credentials:
  container: "{container}"
  region: "{region}"
  EC2_ACCESS_ID: "{EC2_ACCESS_ID}"
  EC2_SECRET_KEY: "{EC2_SECRET_KEY}"
"#,
    },
    Sample {
        service: "storage",
        kind: "google",
        entry: r#"cm:
  active: true
  heading: Google Storage
  host: storage.googleapis.com
  kind: google
  label: "{name}"
  version: v1
default:
  directory: /
credentials:
  bucket: "{bucket}"
  project_id: "{project_id}"
  filename: "{filename}"
"#,
    },
];

/// Returns the sample registered for a service and kind.
pub(crate) fn sample(service: &str, kind: &str) -> Option<&'static Sample> {
    SAMPLES
        .iter()
        .find(|s| s.service == service && s.kind == kind)
}

/// Returns the kinds registered for a service, in declaration order.
pub(crate) fn kinds(service: &str) -> Vec<&'static str> {
    SAMPLES
        .iter()
        .filter(|s| s.service == service)
        .map(|s| s.kind)
        .collect()
}

/// Returns the known service names, deduplicated, in declaration order.
pub(crate) fn services() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for sample in SAMPLES {
        if !seen.contains(&sample.service) {
            seen.push(sample.service);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_config::placeholders;

    #[test]
    fn test_every_sample_is_valid_yaml() {
        for sample in SAMPLES {
            let parsed: Result<serde_yaml::Value, _> = serde_yaml::from_str(sample.entry);
            assert!(
                parsed.is_ok(),
                "sample {}/{} does not parse",
                sample.service,
                sample.kind
            );
        }
    }

    #[test]
    fn test_every_sample_declares_attributes() {
        for sample in SAMPLES {
            let tokens = placeholders(sample.entry);
            assert!(
                !tokens.is_empty(),
                "sample {}/{} has no attribute slots",
                sample.service,
                sample.kind
            );
            assert!(
                tokens.contains(&"{name}".to_string()),
                "sample {}/{} lacks the name slot",
                sample.service,
                sample.kind
            );
        }
    }

    #[test]
    fn test_lookup_by_service_and_kind() {
        assert!(sample("cloud", "aws").is_some());
        assert!(sample("storage", "aws").is_some());
        assert!(sample("cloud", "unknown").is_none());
        assert!(sample("volume", "aws").is_none());
    }

    #[test]
    fn test_kinds_for_cloud() {
        let kinds = kinds("cloud");
        assert_eq!(kinds, vec!["openstack", "aws", "azure", "google", "oracle"]);
    }

    #[test]
    fn test_services_in_declaration_order() {
        assert_eq!(services(), vec!["cloud", "storage"]);
    }
}
