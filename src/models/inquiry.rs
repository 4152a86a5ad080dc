use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

// Option vocabularies are stored by their display label. An unset choice
// is written as `null`, but older records hold `""` instead; see
// `empty_as_none`.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum!(ProjectType {
    EcommerceWebsite => "E-commerce Website",
    BusinessWebsite => "Business Website",
    WebApplication => "Web Application",
    MobileApp => "Mobile App",
    DataDashboard => "Data Dashboard",
    ApiDevelopment => "API Development",
    DatabaseDesign => "Database Design",
    SystemIntegration => "System Integration",
    PerformanceOptimization => "Performance Optimization",
    CustomSoftware => "Custom Software",
    PortfolioWebsite => "Portfolio Website",
    BlogCms => "Blog/CMS",
    LearningManagementSystem => "Learning Management System",
    BookingSystem => "Booking System",
    SocialMediaPlatform => "Social Media Platform",
    Other => "Other",
});

labelled_enum!(KeyFeature {
    UserAuthentication => "User Authentication",
    PaymentGateway => "Payment Gateway",
    AdminDashboard => "Admin Dashboard",
    MobileResponsive => "Mobile Responsive",
    SeoOptimization => "SEO Optimization",
    AnalyticsIntegration => "Analytics Integration",
    EmailIntegration => "Email Integration",
    SocialMediaIntegration => "Social Media Integration",
    MultiLanguageSupport => "Multi-language Support",
    ThirdPartyApiIntegration => "Third-party API Integration",
    RealTimeChat => "Real-time Chat",
    PushNotifications => "Push Notifications",
    FileUploadDownload => "File Upload/Download",
    SearchFunctionality => "Search Functionality",
    UserProfiles => "User Profiles",
    ContentManagement => "Content Management",
});

labelled_enum!(Technology {
    ReactJs => "React.js",
    NextJs => "Next.js",
    VueJs => "Vue.js",
    Angular => "Angular",
    NodeJs => "Node.js",
    Python => "Python",
    Php => "PHP",
    Java => "Java",
    MongoDb => "MongoDB",
    PostgreSql => "PostgreSQL",
    MySql => "MySQL",
    Firebase => "Firebase",
    Aws => "AWS",
    Azure => "Azure",
    GoogleCloud => "Google Cloud",
    Docker => "Docker",
});

labelled_enum!(Integration {
    StripePayment => "Stripe Payment",
    PayPal => "PayPal",
    Razorpay => "Razorpay",
    GoogleAnalytics => "Google Analytics",
    FacebookPixel => "Facebook Pixel",
    Mailchimp => "Mailchimp",
    SendGrid => "SendGrid",
    TwilioSms => "Twilio SMS",
    GoogleMaps => "Google Maps",
    SocialMediaApis => "Social Media APIs",
    CrmIntegration => "CRM Integration",
    ErpIntegration => "ERP Integration",
});

labelled_enum!(Platform {
    WebApplication => "Web Application",
    MobileIos => "Mobile App (iOS)",
    MobileAndroid => "Mobile App (Android)",
    DesktopApplication => "Desktop Application",
    ProgressiveWebApp => "Progressive Web App",
    ChromeExtension => "Chrome Extension",
    ApiBackendOnly => "API/Backend Only",
});

labelled_enum!(BudgetRange {
    FiftyThousandToOneLakh => "₹50,000 - ₹1,00,000",
    OneToTwoHalfLakh => "₹1,00,000 - ₹2,50,000",
    TwoHalfToFiveLakh => "₹2,50,000 - ₹5,00,000",
    FiveToTenLakh => "₹5,00,000 - ₹10,00,000",
    TenToTwentyFiveLakh => "₹10,00,000 - ₹25,00,000",
    TwentyFiveToFiftyLakh => "₹25,00,000 - ₹50,00,000",
    AboveFiftyLakh => "₹50,00,000+",
});

labelled_enum!(Timeline {
    Asap => "ASAP (Rush job - +50% fee)",
    OneToTwoWeeks => "1-2 weeks",
    ThreeToFourWeeks => "3-4 weeks",
    OneToTwoMonths => "1-2 months",
    ThreeToSixMonths => "3-6 months",
    SixPlusMonths => "6+ months",
    Flexible => "Flexible timeline",
});

labelled_enum!(
    #[derive(Default)]
    BudgetType {
        #[default]
        Fixed => "fixed",
        Custom => "custom",
    }
);

labelled_enum!(
    #[derive(Default)]
    Urgency {
        #[default]
        Normal => "normal",
        Urgent => "urgent",
        Rush => "rush",
    }
);

labelled_enum!(
    #[derive(Default)]
    CommunicationPreference {
        #[default]
        Email => "email",
        Phone => "phone",
        Video => "video",
    }
);

labelled_enum!(
    #[derive(Default)]
    InquiryStatus {
        #[default]
        Pending => "pending",
        Reviewed => "reviewed",
        Responded => "responded",
        Rejected => "rejected",
    }
);

labelled_enum!(
    #[derive(Default)]
    ServiceTier {
        #[default]
        FullStack => "full-stack",
        Frontend => "frontend",
        Backend => "backend",
        DataAnalytics => "data-analytics",
        Consultation => "consultation",
    }
);

impl ServiceTier {
    pub fn name(self) -> &'static str {
        match self {
            ServiceTier::FullStack => "Full-Stack Development",
            ServiceTier::Frontend => "Frontend Development",
            ServiceTier::Backend => "Backend Development",
            ServiceTier::DataAnalytics => "Data Analytics & BI",
            ServiceTier::Consultation => "Technical Consultation",
        }
    }

    pub fn price(self) -> &'static str {
        match self {
            ServiceTier::FullStack => "₹2,50,000 - ₹8,00,000",
            ServiceTier::Frontend => "₹1,50,000 - ₹4,00,000",
            ServiceTier::Backend => "₹2,00,000 - ₹5,00,000",
            ServiceTier::DataAnalytics => "₹3,00,000 - ₹10,00,000",
            ServiceTier::Consultation => "₹5,000 - ₹15,000/hour",
        }
    }

    pub fn duration(self) -> &'static str {
        match self {
            ServiceTier::FullStack => "4-12 weeks",
            ServiceTier::Frontend => "2-6 weeks",
            ServiceTier::Backend => "3-8 weeks",
            ServiceTier::DataAnalytics => "4-16 weeks",
            ServiceTier::Consultation => "Flexible",
        }
    }
}

/// Everything the hire-me form collects. Doubles as the wizard's draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryDetails {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,

    pub project_title: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub project_type: Option<ProjectType>,
    pub project_description: String,
    pub target_audience: String,
    pub key_features: BTreeSet<KeyFeature>,

    pub technologies: BTreeSet<Technology>,
    pub integrations: BTreeSet<Integration>,
    pub platforms: BTreeSet<Platform>,

    pub budget_type: BudgetType,
    #[serde(deserialize_with = "empty_as_none")]
    pub budget_range: Option<BudgetRange>,
    pub custom_budget: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub timeline: Option<Timeline>,
    #[serde(deserialize_with = "empty_as_none")]
    pub deadline: Option<NaiveDate>,
    pub urgency: Urgency,

    pub additional_requirements: String,
    pub communication_preference: CommunicationPreference,
    pub reference_links: String,
    pub selected_service: ServiceTier,
}

impl InquiryDetails {
    /// The budget as shown to the admin: custom text or the range label.
    pub fn estimated_value(&self) -> String {
        match self.budget_type {
            BudgetType::Custom => self.custom_budget.clone(),
            BudgetType::Fixed => self
                .budget_range
                .map(|range| range.label().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Decode an optional choice, reading `null` and `""` alike as unset.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    #[serde(flatten)]
    pub details: InquiryDetails,
    pub submitted_at: DateTime<Utc>,
    pub status: InquiryStatus,
    #[serde(default)]
    pub estimated_value: String,
}
