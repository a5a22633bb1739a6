use admin_core::constants::{
    ENV_GROUP_LEVEL_THRESHOLDS, ENV_USER_CLINIC_KEYS, ENV_USER_CLINIC_KEY_PREFIX,
};
use admin_core::{
    AddressQueryResult, AddressService, AdminConfig, CacheService, ClinicService, CodeService,
    GroupHierarchy, Lookup, MemoryCache, SeedData, UserResolverService,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use ng_template::{FormGroupLayout, ModelParser, ModelSchema};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ENV_SEED_FILE: &str = "ADMIN_SEED_FILE";

#[derive(Parser)]
#[command(name = "clinic-admin")]
#[command(about = "Clinic admin cache and form generator CLI")]
struct Cli {
    /// YAML seed file (defaults to ADMIN_SEED_FILE)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AddressBy {
    Zip,
    County,
    Realm,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe one lookup code
    Code {
        item_type: String,
        item_code: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// List every code in a category
    Codes {
        item_type: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Show a cached clinic
    Clinic { code: String },
    /// Resolve the clinics a user's group covers
    UserClinics { user_name: String },
    /// Show a user's group level
    GroupLevel { user_name: String },
    /// Query the address index
    Address {
        #[arg(value_enum)]
        by: AddressBy,
        keyword: String,
    },
    /// Render an Angular form from a model schema
    Form {
        schema: PathBuf,
        /// Model variable bound by the form
        #[arg(long, default_value = "model")]
        model: String,
        /// Form-group grid width (3, 4, 6, 8 or 12)
        #[arg(long, default_value_t = 4)]
        grid: u32,
    },
    /// Render a TypeScript class from a model schema
    Typescript { schema: PathBuf },
}

/// Services built from one seed file.
struct Services {
    codes: CodeService,
    clinics: ClinicService,
    addresses: AddressService,
    users: UserResolverService,
}

impl Services {
    fn build(seed: &SeedData, config: AdminConfig) -> anyhow::Result<Self> {
        let codes = CodeService::create(&seed.code_file_repository())?;
        let clinics = ClinicService::new(MemoryCache::new());
        clinics.create_clinic_cache(&seed.clinic_repository())?;
        let addresses = AddressService::create(&seed.address_repository())?;
        let hierarchy = GroupHierarchy::load(&seed.group_repository())?;

        let cache_service =
            CacheService::new(config, codes.clone(), MemoryCache::new(), MemoryCache::new());
        let users = UserResolverService::new(
            Arc::new(hierarchy),
            clinics.clone(),
            cache_service,
            Arc::new(seed.user_directory()),
        );

        Ok(Self {
            codes,
            clinics,
            addresses,
            users,
        })
    }
}

fn load_services(seed: Option<PathBuf>, config: AdminConfig) -> anyhow::Result<Services> {
    let path = seed
        .or_else(|| std::env::var(ENV_SEED_FILE).ok().map(PathBuf::from))
        .with_context(|| format!("no seed file given; pass --seed or set {ENV_SEED_FILE}"))?;
    let seed = SeedData::load(&path)?;
    let services = Services::build(&seed, config)?;
    tracing::info!(
        seed = %path.display(),
        clinics = seed.clinics.len(),
        users = seed.users.len(),
        "services ready"
    );
    Ok(services)
}

fn load_schema(path: &Path) -> anyhow::Result<ModelSchema> {
    ModelSchema::load(path).with_context(|| format!("loading schema {}", path.display()))
}

/// Prints the value, or the not-found message.
fn report<T>(lookup: Lookup<T>, print: impl FnOnce(T)) {
    match lookup {
        Ok(value) => print(value),
        Err(miss) => eprintln!("{miss}"),
    }
}

fn print_address(result: AddressQueryResult) {
    println!("Zips: {}", result.zips.join(", "));
    println!("Counties: {}", result.counties.join(", "));
    println!("Realms: {}", result.realms.join(", "));
    println!("Streets: {}", result.streets.join(", "));
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_admin=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AdminConfig::from_env_values(
        std::env::var(ENV_USER_CLINIC_KEYS).ok(),
        std::env::var(ENV_USER_CLINIC_KEY_PREFIX).ok(),
        std::env::var(ENV_GROUP_LEVEL_THRESHOLDS).ok(),
    )?;

    match cli.command {
        Some(Commands::Code {
            item_type,
            item_code,
            parent,
        }) => {
            let services = load_services(cli.seed, config)?;
            let description =
                services
                    .codes
                    .get_description(&item_type, &item_code, parent.as_deref())?;
            report(description, |d| println!("{d}"));
        }
        Some(Commands::Codes { item_type, parent }) => {
            let services = load_services(cli.seed, config)?;
            report(
                services.codes.get_details(&item_type, parent.as_deref()),
                |details| {
                    for (code, description) in details {
                        println!("{code}\t{description}");
                    }
                },
            );
        }
        Some(Commands::Clinic { code }) => {
            let services = load_services(cli.seed, config)?;
            report(services.clinics.get(&code), |clinic| {
                println!("ID: {}, Code: {}, Name: {}", clinic.id, clinic.code, clinic.name);
                if let Some(database) = clinic.database {
                    println!("Database: {database}");
                }
            });
        }
        Some(Commands::UserClinics { user_name }) => {
            let services = load_services(cli.seed, config)?;
            report(services.users.resolve_user(&user_name)?, |resolved| {
                println!(
                    "{} ({})",
                    resolved.principal.display_name(),
                    resolved.principal.group_code
                );
                for clinic in resolved.clinics {
                    println!("{}\t{}", clinic.code, clinic.name);
                }
            });
        }
        Some(Commands::GroupLevel { user_name }) => {
            let services = load_services(cli.seed, config)?;
            match services.users.resolve_user(&user_name)? {
                Ok(resolved) => match services.users.user_group_level(&resolved.principal)? {
                    Some(level) => println!("{level}"),
                    None => println!("No group level for {user_name}"),
                },
                Err(miss) => eprintln!("{miss}"),
            }
        }
        Some(Commands::Address { by, keyword }) => {
            let services = load_services(cli.seed, config)?;
            let result = match by {
                AddressBy::Zip => services.addresses.get_by_zip(&keyword),
                AddressBy::County => services.addresses.get_by_county(&keyword),
                AddressBy::Realm => services.addresses.get_by_realm(&keyword),
            };
            report(result, print_address);
        }
        Some(Commands::Form {
            schema,
            model,
            grid,
        }) => {
            let schema = load_schema(&schema)?;
            let layout = FormGroupLayout::from_form_grid(model, grid)?;
            println!("{}", ModelParser::create_form(&schema, &layout)?);
        }
        Some(Commands::Typescript { schema }) => {
            let schema = load_schema(&schema)?;
            println!("{}", ModelParser::create_typescript_class(&schema));
        }
        None => {
            println!("Use 'clinic-admin --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SEED: &str = r#"
clinics:
  - { id: 1, code: "0001", name: "Alpha" }
groups:
  - { code: "01", name: "North" }
  - { code: "0101", name: "Alpha", parent_code: "01", clinic_code: "0001" }
users:
  - { id: "u1", user_name: "amy@example.com", group_code: "01" }
"#;

    #[test]
    fn test_load_services_from_seed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seed.yaml");
        fs::write(&path, SEED).unwrap();

        let services = load_services(Some(path), AdminConfig::default()).unwrap();
        assert_eq!(services.clinics.get("0001").unwrap().name, "Alpha");
        let resolved = services
            .users
            .resolve_user("amy@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(resolved.clinics.len(), 1);
    }

    #[test]
    fn test_load_services_missing_seed_file_fails() {
        let temp = TempDir::new().unwrap();
        let result = load_services(Some(temp.path().join("absent.yaml")), AdminConfig::default());
        assert!(result.is_err());
    }
}
