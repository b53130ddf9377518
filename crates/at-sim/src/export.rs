//! CSV export of a simulation record.

use crate::driver::SimRecord;
use crate::error::SimResult;
use std::io::Write;
use std::path::Path;

const COLUMNS: [&str; 20] = [
    "time_s",
    "mach",
    "altitude_m",
    "T_inf_K",
    "qbar_Pa",
    "Re_inf",
    "turbulent",
    "q_conv_W_m2",
    "h_W_m2K",
    "q_rad_W_m2",
    "q_net_W_m2",
    "T_e_K",
    "T_recovery_K",
    "T_total_K",
    "T_te_K",
    "eta",
    "s_dot_m_s",
    "mdot_pyro_kg_m2s",
    "ablative_thickness_m",
    "stable",
];

fn flag(b: bool) -> String {
    if b { "1".into() } else { "0".into() }
}

/// One row per time point, then one wall-temperature column per element.
pub fn write_csv<W: Write>(record: &SimRecord, writer: W) -> SimResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(
        record
            .coordinates_m
            .iter()
            .map(|y| format!("T_wall:y={y}")),
    );
    wtr.write_record(&header)?;

    for i in 0..record.len() {
        let mut row = vec![
            record.t_s[i].to_string(),
            record.mach[i].to_string(),
            record.altitude_m[i].to_string(),
            record.t_inf_k[i].to_string(),
            record.qbar_pa[i].to_string(),
            record.re_inf[i].to_string(),
            flag(record.turbulent[i]),
            record.q_conv[i].to_string(),
            record.h_coeff[i].to_string(),
            record.q_rad[i].to_string(),
            record.q_net[i].to_string(),
            record.t_edge_k[i].to_string(),
            record.t_recovery_k[i].to_string(),
            record.t_total_k[i].to_string(),
            record.t_edge_total_k[i].to_string(),
            record.eta[i].to_string(),
            record.s_dot[i].to_string(),
            record.mdot_pyro[i].to_string(),
            record.ablative_thickness_m[i].to_string(),
            flag(record.stable[i]),
        ];
        row.extend(record.wall_temps[i].iter().map(|t| t.to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(record: &SimRecord, path: &Path) -> SimResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(record, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_materials::MaterialDatabase;
    use at_wall::{Layer, WallStack};
    use std::collections::HashSet;

    fn two_point_record() -> SimRecord {
        SimRecord {
            t_s: vec![0.0, 0.5],
            mach: vec![2.0, 2.1],
            altitude_m: vec![1000.0, 1100.0],
            t_inf_k: vec![281.65, 281.0],
            qbar_pa: vec![2.5e5, 2.6e5],
            re_inf: vec![4.0e7, 4.1e7],
            turbulent: vec![true, true],
            q_conv: vec![1.0e5, 0.9e5],
            h_coeff: vec![500.0, 480.0],
            q_rad: vec![0.0, -1.0],
            q_net: vec![1.0e5, 0.9e5 - 1.0],
            t_edge_k: vec![300.0, 301.0],
            t_edge_total_k: vec![506.0, 530.0],
            t_recovery_k: vec![480.0, 500.0],
            t_total_k: vec![506.0, 530.0],
            eta: vec![1.0, 1.0],
            s_dot: vec![0.0, 0.0],
            mdot_pyro: vec![0.0, 0.0],
            ablative_thickness_m: vec![0.0, 0.0],
            stable: vec![true, false],
            coordinates_m: vec![0.001, 0.003],
            wall_temps: vec![vec![290.0, 290.0], vec![295.5, 290.25]],
            wall_densities: vec![vec![8000.0, 8000.0], vec![8000.0, 8000.0]],
        }
    }

    #[test]
    fn header_names_every_column_and_element() {
        let mut buf = Vec::new();
        write_csv(&two_point_record(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(header.len(), COLUMNS.len() + 2);
        assert_eq!(header[0], "time_s");
        assert_eq!(header[20], "T_wall:y=0.001");
        assert_eq!(header[21], "T_wall:y=0.003");
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn fine_walls_get_one_distinct_column_per_element() {
        // 0.1 mm elements
        let wall = WallStack::from_layers(
            &MaterialDatabase::builtin(),
            &[Layer::new("ALU6061", 0.01, 100)],
            290.0,
        )
        .unwrap();
        let record = SimRecord {
            coordinates_m: wall.coordinates(),
            ..SimRecord::default()
        };
        let mut buf = Vec::new();
        write_csv(&record, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        let wall_columns: Vec<&str> = header
            .split(',')
            .filter(|c| c.starts_with("T_wall"))
            .collect();
        assert_eq!(wall_columns.len(), 100);
        let unique: HashSet<&str> = wall_columns.iter().copied().collect();
        assert_eq!(unique.len(), 100);
    }

    #[test]
    fn rows_read_back_through_csv() {
        let mut buf = Vec::new();
        write_csv(&two_point_record(), &mut buf).unwrap();
        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(&rows[1][0], "0.5");
        assert_eq!(&rows[1][6], "1");
        assert_eq!(&rows[1][19], "0");
        assert_eq!(rows[1][20].parse::<f64>().unwrap(), 295.5);
    }
}
