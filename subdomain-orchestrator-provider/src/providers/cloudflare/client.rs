//! `DnsClient` trait implementation for Cloudflare.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::traits::DnsClient;
use crate::types::DnsRecord;

use super::{CloudflareDns, CloudflareDnsRecord};

impl CloudflareDns {
    fn to_dns_record(cf_record: CloudflareDnsRecord) -> DnsRecord {
        DnsRecord {
            id: cf_record.id,
            name: cf_record.name,
            record_type: cf_record.record_type,
            content: cf_record.content,
            proxied: cf_record.proxied,
        }
    }

    /// Look up records by full name within the configured zone.
    async fn records_by_name(&self, full_domain: &str) -> Result<Vec<CloudflareDnsRecord>> {
        let path = format!(
            "/zones/{}/dns_records?name={}",
            self.zone_id,
            urlencoding::encode(full_domain)
        );
        self.get(&path).await
    }
}

#[async_trait]
impl DnsClient for CloudflareDns {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn find_record(&self, full_domain: &str) -> Result<Option<DnsRecord>> {
        let records = self.records_by_name(full_domain).await?;
        Ok(records.into_iter().next().map(Self::to_dns_record))
    }

    async fn create_record(&self, full_domain: &str, target: &str) -> Result<String> {
        #[derive(Serialize)]
        struct CreateRecordBody<'a> {
            #[serde(rename = "type")]
            record_type: &'a str,
            name: &'a str,
            content: &'a str,
            ttl: u32,
            proxied: bool,
        }

        // Proxied CNAME with automatic TTL, pointing the subdomain at the
        // root domain, as the hosting setup expects.
        let body = CreateRecordBody {
            record_type: "CNAME",
            name: full_domain,
            content: target,
            ttl: 1,
            proxied: true,
        };

        let record: CloudflareDnsRecord = self
            .post(&format!("/zones/{}/dns_records", self.zone_id), &body)
            .await?;

        log::info!("Cloudflare DNS record created: {full_domain}");
        Ok(record.id)
    }

    async fn delete_record(&self, full_domain: &str) -> Result<()> {
        let records = self.records_by_name(full_domain).await?;

        let Some(record) = records.into_iter().next() else {
            log::warn!("Cloudflare DNS record not found for {full_domain}");
            return Err(ProviderError::RecordNotFound {
                provider: "cloudflare".to_string(),
                name: full_domain.to_string(),
            });
        };

        self.delete(&format!("/zones/{}/dns_records/{}", self.zone_id, record.id))
            .await?;

        log::info!("Cloudflare DNS record deleted: {full_domain}");
        Ok(())
    }
}
