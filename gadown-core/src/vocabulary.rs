//! Static metric and dimension vocabulary of the Reporting API.
//!
//! Used to decide whether a filter term targets a metric or a dimension.
//! The lists cover the commonly used identifiers, not the full API catalogue.

/// Kind of a known identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A metric.
    Metric,
    /// A dimension.
    Dimension,
}

/// Known metrics.
pub const METRICS: &[&str] = &[
    // User
    "ga:users",
    "ga:newUsers",
    "ga:percentNewSessions",
    "ga:1dayUsers",
    "ga:7dayUsers",
    "ga:14dayUsers",
    "ga:28dayUsers",
    "ga:30dayUsers",
    "ga:sessionsPerUser",
    // Session
    "ga:sessions",
    "ga:bounces",
    "ga:bounceRate",
    "ga:sessionDuration",
    "ga:avgSessionDuration",
    "ga:uniqueDimensionCombinations",
    "ga:hits",
    // Traffic Sources
    "ga:organicSearches",
    // Adwords
    "ga:impressions",
    "ga:adClicks",
    "ga:adCost",
    "ga:CPM",
    "ga:CPC",
    "ga:CTR",
    "ga:costPerTransaction",
    "ga:costPerGoalConversion",
    "ga:costPerConversion",
    "ga:RPC",
    "ga:ROAS",
    // Page Tracking
    "ga:pageviews",
    "ga:uniquePageviews",
    "ga:pageviewsPerSession",
    "ga:timeOnPage",
    "ga:avgTimeOnPage",
    "ga:entrances",
    "ga:exits",
    "ga:exitRate",
    // Goal Conversions
    "ga:goalCompletionsAll",
    "ga:goalStartsAll",
    "ga:goalValueAll",
    "ga:goalConversionRateAll",
    // Event Tracking
    "ga:totalEvents",
    "ga:uniqueEvents",
    "ga:eventValue",
    "ga:avgEventValue",
    // Ecommerce
    "ga:transactions",
    "ga:transactionRevenue",
    "ga:transactionsPerSession",
    "ga:revenuePerTransaction",
    "ga:itemQuantity",
    "ga:itemRevenue",
    "ga:uniquePurchases",
];

/// Known dimensions.
pub const DIMENSIONS: &[&str] = &[
    // User
    "ga:userType",
    "ga:sessionCount",
    "ga:daysSinceLastSession",
    "ga:userDefinedValue",
    "ga:userBucket",
    // Session
    "ga:sessionDurationBucket",
    // Traffic Sources
    "ga:referralPath",
    "ga:fullReferrer",
    "ga:campaign",
    "ga:source",
    "ga:medium",
    "ga:sourceMedium",
    "ga:keyword",
    "ga:adContent",
    "ga:socialNetwork",
    "ga:hasSocialSourceReferral",
    "ga:campaignCode",
    "ga:channelGrouping",
    // Adwords
    "ga:adGroup",
    "ga:adSlot",
    "ga:adDistributionNetwork",
    "ga:adMatchType",
    "ga:adKeywordMatchType",
    "ga:adMatchedQuery",
    "ga:adPlacementDomain",
    "ga:adPlacementUrl",
    "ga:adFormat",
    "ga:adTargetingType",
    "ga:adTargetingOption",
    "ga:adDisplayUrl",
    "ga:adDestinationUrl",
    "ga:adwordsCustomerID",
    "ga:adwordsCampaignID",
    "ga:adwordsAdGroupID",
    "ga:adwordsCreativeID",
    "ga:adwordsCriteriaID",
    "ga:adQueryWordCount",
    "ga:isTrueViewVideoAd",
    // Time
    "ga:date",
    "ga:year",
    "ga:month",
    "ga:week",
    "ga:day",
    "ga:hour",
    "ga:dateHour",
    "ga:yearMonth",
    "ga:yearWeek",
    "ga:dayOfWeek",
    // Platform or Device
    "ga:browser",
    "ga:operatingSystem",
    "ga:deviceCategory",
    "ga:mobileDeviceInfo",
    // Geo Network
    "ga:continent",
    "ga:country",
    "ga:region",
    "ga:city",
    // Page Tracking
    "ga:hostname",
    "ga:pagePath",
    "ga:pageTitle",
    "ga:landingPagePath",
    "ga:exitPagePath",
    // Event Tracking
    "ga:eventCategory",
    "ga:eventAction",
    "ga:eventLabel",
    // Ecommerce
    "ga:transactionId",
    "ga:productSku",
    "ga:productName",
    "ga:productCategory",
];

/// Returns true if the identifier is a known metric.
pub fn is_metric(field: &str) -> bool {
    METRICS.contains(&field)
}

/// Returns true if the identifier is a known dimension.
pub fn is_dimension(field: &str) -> bool {
    DIMENSIONS.contains(&field)
}

/// Classifies an identifier, looking at metrics first.
pub fn classify(field: &str) -> Option<FieldKind> {
    if is_metric(field) {
        Some(FieldKind::Metric)
    } else if is_dimension(field) {
        Some(FieldKind::Dimension)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_classify() {
        assert_eq!(classify("ga:sessions"), Some(FieldKind::Metric));
        assert_eq!(classify("ga:source"), Some(FieldKind::Dimension));
        assert_eq!(classify("ga:nope"), None);
        assert_eq!(classify("sessions"), None);
    }

    #[test]
    fn test_vocabularies_are_disjoint_and_unique() {
        let metrics: HashSet<_> = METRICS.iter().collect();
        let dimensions: HashSet<_> = DIMENSIONS.iter().collect();

        assert_eq!(metrics.len(), METRICS.len(), "duplicate metric");
        assert_eq!(dimensions.len(), DIMENSIONS.len(), "duplicate dimension");
        assert!(metrics.is_disjoint(&dimensions));
    }

    #[test]
    fn test_all_identifiers_are_reporting_api() {
        for field in METRICS.iter().chain(DIMENSIONS) {
            assert!(field.starts_with("ga:"), "{field}");
        }
    }
}
