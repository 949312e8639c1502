//! Server configuration from command-line arguments and environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::connections::{SegmentPair, SegmentTable};
use crate::domain::RouteId;

/// Bus schedule server.
#[derive(Debug, Clone, Parser)]
#[command(name = "schedule-server", version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// JSON file to persist schedule data to (in-memory only if omitted)
    #[arg(long, env = "DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Route ids of the outbound trip's two segments, as "first,second"
    #[arg(long, env = "OUTBOUND_SEGMENTS", default_value = "1,2")]
    pub outbound_segments: SegmentPair,

    /// Route ids of the return trip's two segments, as "first,second"
    #[arg(long, env = "RETURN_SEGMENTS", default_value = "3,4")]
    pub return_segments: SegmentPair,
}

impl ServerConfig {
    /// The direction → segments table for connection queries.
    pub fn segment_table(&self) -> SegmentTable {
        SegmentTable::new(self.outbound_segments, self.return_segments)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_file: None,
            outbound_segments: SegmentPair::new(RouteId(1), RouteId(2)),
            return_segments: SegmentPair::new(RouteId(3), RouteId(4)),
        }
    }
}
