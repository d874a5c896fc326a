use clap::{Parser, Subcommand, ValueEnum};
use corelib::BtcNetwork;

#[derive(Debug, Parser)]
#[command(name = "swapview", version, about = "Inspect swap contracts on Stacks")]
pub struct Cli {
    /// Stacks API base url (overrides STACKS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// BNS lookup base url (overrides BNS_LOOKUP_URL)
    #[arg(long, global = true)]
    pub bns_url: Option<String>,

    /// Deployer address of the swap contracts (overrides SWAP_DEPLOYER)
    #[arg(long, global = true)]
    pub deployer: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub network: Option<NetworkArg>,

    /// Emit JSON logs
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for BtcNetwork {
    fn from(n: NetworkArg) -> Self {
        match n {
            NetworkArg::Mainnet => BtcNetwork::Mainnet,
            NetworkArg::Testnet => BtcNetwork::Testnet,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current Stacks chain height
    Height,

    /// Show how a swap type tag is classified
    Classify { swap_type: String },

    /// Load a swap and print the view snapshot
    Swap {
        #[arg(long = "type")]
        swap_type: String,

        #[arg(long)]
        id: u64,

        /// Connected user; atomic swaps default the recipient to it
        #[arg(long)]
        owner: Option<String>,
    },

    /// Image url of an NFT
    NftImage { contract: String, id: u128 },

    /// Owner of an NFT, as BNS name when it has one
    NftOwner { contract: String, id: u128 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Height => "height",
            Command::Classify { .. } => "classify",
            Command::Swap { .. } => "swap",
            Command::NftImage { .. } => "nft-image",
            Command::NftOwner { .. } => "nft-owner",
        }
    }
}
