/// Graph nodes that process sequence records.

pub mod input_fasta_node;
pub use input_fasta_node::*;

pub mod scan_motif_node;
pub use scan_motif_node::*;

pub mod for_each_node;
pub use for_each_node::*;

pub mod output_hits_node;
pub use output_hits_node::*;
