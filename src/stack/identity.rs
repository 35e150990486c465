use serde_json::{json, Map, Value};

use super::{GoogleCredentials, StackConfig};

pub const GOOGLE_PROVIDER: &str = "Google";
pub const COGNITO_PROVIDER: &str = "COGNITO";

/// User pool, optional Google federation, hosted domain and the OAuth app client.
pub(crate) fn identity_resources(config: &StackConfig, resources: &mut Map<String, Value>) {
    resources.insert(
        "UserPool".to_string(),
        json!({
            "Type": "AWS::Cognito::UserPool",
            "Properties": {
                "AdminCreateUserConfig": { "AllowAdminCreateUserOnly": false },
                "UsernameAttributes": ["email"],
                "AutoVerifiedAttributes": ["email"],
                "AccountRecoverySetting": {
                    "RecoveryMechanisms": [{ "Name": "verified_email", "Priority": 1 }],
                },
            },
        }),
    );

    if let Some(google) = &config.google {
        resources.insert("Google".to_string(), google_provider(google));
    }

    resources.insert(
        "UserPoolDomain".to_string(),
        json!({
            "Type": "AWS::Cognito::UserPoolDomain",
            "Properties": {
                "UserPoolId": { "Ref": "UserPool" },
                "Domain": config.domain_prefix,
            },
        }),
    );

    let mut providers = vec![COGNITO_PROVIDER];
    if config.google.is_some() {
        providers.push(GOOGLE_PROVIDER);
    }

    let mut client = json!({
        "Type": "AWS::Cognito::UserPoolClient",
        "Properties": {
            "UserPoolId": { "Ref": "UserPool" },
            "AllowedOAuthFlowsUserPoolClient": true,
            "AllowedOAuthFlows": ["code"],
            "AllowedOAuthScopes": ["profile", "phone", "email", "openid", "aws.cognito.signin.user.admin"],
            "CallbackURLs": [config.callback_url],
            "LogoutURLs": [config.logout_url],
            "SupportedIdentityProviders": providers,
        },
    });
    // The client can only name Google once the provider exists.
    if config.google.is_some() {
        client["DependsOn"] = json!(["Google"]);
    }
    resources.insert("UserPoolAppClient".to_string(), client);
}

fn google_provider(google: &GoogleCredentials) -> Value {
    json!({
        "Type": "AWS::Cognito::UserPoolIdentityProvider",
        "Properties": {
            "UserPoolId": { "Ref": "UserPool" },
            "ProviderName": GOOGLE_PROVIDER,
            "ProviderType": GOOGLE_PROVIDER,
            "ProviderDetails": {
                "client_id": google.client_id,
                "client_secret": google.client_secret,
                "authorize_scopes": "profile",
            },
            "AttributeMapping": { "email": "email" },
        },
    })
}

/// URLs of the hosted sign-in pages behind the user pool domain.
#[derive(Debug, Clone)]
pub struct HostedUi {
    domain_prefix: String,
    region: String,
}

impl HostedUi {
    pub fn new(config: &StackConfig) -> Self {
        Self {
            domain_prefix: config.domain_prefix.clone(),
            region: config.region.clone(),
        }
    }

    pub fn base_url(&self) -> String {
        format!(
            "https://{}.auth.{}.amazoncognito.com",
            self.domain_prefix, self.region
        )
    }

    /// Authorization-code grant entry point. `provider` skips the provider picker.
    pub fn authorize_url(&self, client_id: &str, redirect_uri: &str, provider: Option<&str>) -> String {
        let mut url = format!(
            "{}/oauth2/authorize?response_type=code&client_id={}&redirect_uri={}",
            self.base_url(),
            urlencoding::encode(client_id),
            urlencoding::encode(redirect_uri)
        );
        if let Some(provider) = provider {
            url.push_str("&identity_provider=");
            url.push_str(&urlencoding::encode(provider));
        }
        url
    }

    pub fn logout_url(&self, client_id: &str, logout_uri: &str) -> String {
        format!(
            "{}/logout?client_id={}&logout_uri={}",
            self.base_url(),
            urlencoding::encode(client_id),
            urlencoding::encode(logout_uri)
        )
    }
}
