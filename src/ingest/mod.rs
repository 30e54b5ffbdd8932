//! OpenFlights ingestion
//!
//! Reads `airports` and `routes` text files into a [`RouteGraph`].
//! Parsing is best-effort and line by line: a record that cannot be read or does not carry a
//! usable IATA code is skipped and counted, never reported as an error.
//! Only failures of the underlying reader abort a load.
//!
//! Airport records: `id,"name","city","country","IATA","ICAO",...`
//! Route records: `airline,airline_id,source,source_id,destination,destination_id,...`

use crate::error::AirRankResult;
use crate::graph::RouteGraph;
use csv::StringRecord;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

const AIRPORT_NAME: usize = 1;
const AIRPORT_COUNTRY: usize = 3;
const AIRPORT_IATA: usize = 4;

const ROUTE_SOURCE: usize = 2;
const ROUTE_DESTINATION: usize = 4;

/// Per-file ingestion counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Records turned into graph operations
    pub accepted: usize,
    /// Records dropped as malformed
    pub skipped: usize,
}

impl IngestStats {
    pub fn total(&self) -> usize {
        self.accepted + self.skipped
    }
}

/// A three-character alphanumeric IATA code
pub fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Read airport declarations from `reader`
pub fn read_airports<R: Read>(graph: &mut RouteGraph, reader: R) -> AirRankResult<IngestStats> {
    for_each_record(reader, true, |record| {
        let (Some(name), Some(country), Some(code)) = (
            record.get(AIRPORT_NAME),
            record.get(AIRPORT_COUNTRY),
            record.get(AIRPORT_IATA),
        ) else {
            return false;
        };
        if !is_iata_code(code) {
            return false;
        }
        graph.add_node(code, format!("{}, {}", name, country)).is_ok()
    })
}

/// Read route records from `reader`; each record adds weight 1.
///
/// Route files carry no quoted fields, so quotes are read as plain text.
pub fn read_routes<R: Read>(graph: &mut RouteGraph, reader: R) -> AirRankResult<IngestStats> {
    for_each_record(reader, false, |record| {
        let (Some(source), Some(destination)) =
            (record.get(ROUTE_SOURCE), record.get(ROUTE_DESTINATION))
        else {
            return false;
        };
        if !is_iata_code(source) || !is_iata_code(destination) {
            return false;
        }
        graph.add_route(source, destination).is_ok()
    })
}

/// Load an airports file from disk
pub fn load_airports(graph: &mut RouteGraph, path: impl AsRef<Path>) -> AirRankResult<IngestStats> {
    let path = path.as_ref();
    info!("Reading airports from {:?}", path);
    let stats = read_airports(graph, File::open(path)?)?;
    info!(
        "There were {} airports with IATA code ({} records skipped)",
        stats.accepted, stats.skipped
    );
    Ok(stats)
}

/// Load a routes file from disk
pub fn load_routes(graph: &mut RouteGraph, path: impl AsRef<Path>) -> AirRankResult<IngestStats> {
    let path = path.as_ref();
    info!("Reading routes from {:?}", path);
    let stats = read_routes(graph, File::open(path)?)?;
    info!(
        "There were {} routes between IATA airports ({} records skipped)",
        stats.accepted, stats.skipped
    );
    Ok(stats)
}

/// Feed every line of `reader` to `accept` as a CSV record.
///
/// Lines are split before CSV parsing so a broken record, such as one with an
/// unbalanced quote, only ever costs that one line. Blank lines are ignored.
fn for_each_record<R, F>(reader: R, quoting: bool, mut accept: F) -> AirRankResult<IngestStats>
where
    R: Read,
    F: FnMut(&StringRecord) -> bool,
{
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true).quoting(quoting);

    let mut stats = IngestStats::default();
    let mut record = StringRecord::new();

    for (number, line) in BufReader::new(reader).split(b'\n').enumerate() {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let mut parser = builder.from_reader(line.as_slice());
        match parser.read_record(&mut record) {
            Ok(true) if accept(&record) => stats.accepted += 1,
            Ok(_) => {
                debug!("Skipping record on line {}", number + 1);
                stats.skipped += 1;
            }
            Err(e) => {
                debug!("Skipping unreadable record on line {}: {}", number + 1, e);
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const AIRPORTS: &str = r#"1,"Goroka Airport","Goroka","Papua New Guinea","GKA","AYGA",-6.08,145.39,5282,10,"U","Pacific/Port_Moresby","airport","OurAirports"
2,"Madang Airport","Madang","Papua New Guinea","MAG","AYMD",-5.20,145.78,20,10,"U","Pacific/Port_Moresby","airport","OurAirports"
3,"Some Strip","Nowhere","Iceland",\N,"BIXX",0,0,0,0,"N","\N","airport","OurAirports"
4,"Barcelona, El Prat","Barcelona","Spain","BCN","LEBL",41.29,2.07,12,1,"E","Europe/Madrid","airport","OurAirports"
garbage
"#;

    #[test]
    fn test_iata_code() {
        assert!(is_iata_code("BCN"));
        assert!(is_iata_code("A1B"));
        assert!(!is_iata_code("\\N"));
        assert!(!is_iata_code(""));
        assert!(!is_iata_code("LEBL"));
        assert!(!is_iata_code("B N"));
    }

    #[test]
    fn test_read_airports() {
        let mut graph = RouteGraph::new();
        let stats = read_airports(&mut graph, AIRPORTS.as_bytes()).unwrap();

        assert_eq!(stats, IngestStats { accepted: 3, skipped: 2 });
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.airport("GKA").unwrap().name, "Goroka Airport, Papua New Guinea");
        // Quoted commas stay inside the field
        assert_eq!(graph.airport("BCN").unwrap().name, "Barcelona, El Prat, Spain");
        assert!(graph.airports().all(|a| !a.placeholder));
    }

    #[test]
    fn test_read_routes() {
        let routes = "\
2B,410,AER,2965,KZN,2990,,0,CR2
2B,410,AER,2965,KZN,2990,,0,CR2
2B,410,KZN,2990,AER,2965,,0,CR2
2B,410,ASF,2966,\\N,\\N,,0,CR2
short,line
2B,410,ASF,2966,MRV,2962,,0,CR2
";
        let mut graph = RouteGraph::new();
        let stats = read_routes(&mut graph, routes.as_bytes()).unwrap();

        assert_eq!(stats, IngestStats { accepted: 4, skipped: 2 });
        assert_eq!(stats.total(), 6);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.outgoing_weight("AER"), Some(2.0));
        assert_eq!(graph.outgoing_weight("MRV"), Some(0.0));
        assert!(graph.airport("MRV").unwrap().placeholder);
    }

    #[test]
    fn test_unbalanced_quote_only_skips_its_line() {
        let airports = r#"1,"Goroka Airport","Goroka","Papua New Guinea","GKA","AYGA",-6.08,145.39,5282,10,"U","Pacific/Port_Moresby","airport","OurAirports"
5,"Broken Airport,Town,Country,BRK,XXXX,0,0,0,0,U
2,"Madang Airport","Madang","Papua New Guinea","MAG","AYMD",-5.20,145.78,20,10,"U","Pacific/Port_Moresby","airport","OurAirports"
4,"Barcelona, El Prat","Barcelona","Spain","BCN","LEBL",41.29,2.07,12,1,"E","Europe/Madrid","airport","OurAirports"
"#;
        let mut graph = RouteGraph::new();
        let stats = read_airports(&mut graph, airports.as_bytes()).unwrap();

        assert_eq!(stats, IngestStats { accepted: 3, skipped: 1 });
        let ids: Vec<&str> = graph.airports().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["GKA", "MAG", "BCN"]);
        assert_eq!(graph.airport("BCN").unwrap().name, "Barcelona, El Prat, Spain");
    }

    #[test]
    fn test_stray_quote_in_routes() {
        let routes = "\
2B,410,AER,2965,KZN,2990,,0,CR2
2B,410,\"AER,2965,KZN,2990,,0,CR2
2B,410,KZN,2990,AER,2965,,0,CR2
2B,410,LED,2948,AER,2965,,0,CR2
";
        let mut graph = RouteGraph::new();
        let stats = read_routes(&mut graph, routes.as_bytes()).unwrap();

        assert_eq!(stats, IngestStats { accepted: 3, skipped: 1 });
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.incoming_edges("AER").len(), 2);
    }

    #[test]
    fn test_blank_and_crlf_lines() {
        let routes = "2B,410,AER,2965,KZN,2990,,0,CR2\r\n\r\n2B,410,KZN,2990,AER,2965,,0,CR2\r\n";
        let mut graph = RouteGraph::new();
        let stats = read_routes(&mut graph, routes.as_bytes()).unwrap();

        assert_eq!(stats, IngestStats { accepted: 2, skipped: 0 });
        assert!(graph.airport("KZN").is_some());
    }

    #[test]
    fn test_invalid_utf8_record_is_skipped() {
        let mut bytes = b"2B,410,AER,2965,KZN,2990,,0,CR2\n".to_vec();
        bytes.extend_from_slice(b"2B,410,\xff\xfe,2965,KZN,2990,,0,CR2\n");
        bytes.extend_from_slice(b"2B,410,KZN,2990,AER,2965,,0,CR2\n");

        let mut graph = RouteGraph::new();
        let stats = read_routes(&mut graph, bytes.as_slice()).unwrap();
        assert_eq!(stats, IngestStats { accepted: 2, skipped: 1 });
    }

    #[test]
    fn test_load_from_disk() {
        let mut airports = tempfile::NamedTempFile::new().unwrap();
        write!(airports, "{}", AIRPORTS).unwrap();
        let mut routes = tempfile::NamedTempFile::new().unwrap();
        writeln!(routes, "XX,1,GKA,1,BCN,4,,0,738").unwrap();

        let mut graph = RouteGraph::new();
        load_airports(&mut graph, airports.path()).unwrap();
        let stats = load_routes(&mut graph, routes.path()).unwrap();

        assert_eq!(stats.accepted, 1);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.incoming_edges("BCN").len(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut graph = RouteGraph::new();
        let err = load_airports(&mut graph, "/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, crate::error::AirRankError::Io(_)));
    }
}
