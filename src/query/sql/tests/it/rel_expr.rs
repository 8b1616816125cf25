// Copyright 2021 Datafuse Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use corvus_common_exception::Result;
use corvus_common_sql::optimizer::Matcher;
use corvus_common_sql::optimizer::RelExpr;
use corvus_common_sql::plans::JoinType;
use corvus_common_sql::plans::RelOp;

use crate::fixture::column_ref;
use crate::fixture::eq;
use crate::fixture::eval_scalar;
use crate::fixture::filter;
use crate::fixture::int_const;
use crate::fixture::join;
use crate::fixture::table_a;
use crate::fixture::table_b;

#[test]
fn test_passthrough_output_columns() -> Result<()> {
    let (scan_a, x, w) = table_a();
    let filtered = filter(vec![eq(column_ref(&x), int_const(1))], scan_a);

    let prop = RelExpr::with_s_expr(&filtered).derive_relational_prop()?;
    assert_eq!(prop.output_exprs.len(), 2);
    assert!(prop.output_columns.contains(&x.index));
    assert!(prop.output_columns.contains(&w.index));
    Ok(())
}

#[test]
fn test_projection_narrows_output_columns() -> Result<()> {
    let (scan_a, x, w) = table_a();
    let projected = eval_scalar(vec![column_ref(&x)], scan_a);

    let prop = RelExpr::with_s_expr(&projected).derive_relational_prop()?;
    assert_eq!(prop.output_exprs, vec![column_ref(&x)]);
    assert!(!prop.output_columns.contains(&w.index));
    Ok(())
}

#[test]
fn test_join_output_columns_depend_on_join_type() -> Result<()> {
    let (scan_a, x, _) = table_a();
    let (scan_b, y, _, _) = table_b();
    let predicates = vec![eq(column_ref(&x), column_ref(&y))];

    let inner = join(
        JoinType::Inner,
        predicates.clone(),
        scan_a.clone(),
        scan_b.clone(),
    );
    let prop = RelExpr::with_s_expr(&inner).derive_relational_prop()?;
    assert!(prop.output_columns.contains(&x.index));
    assert!(prop.output_columns.contains(&y.index));

    // Semi joins do not preserve right-side columns.
    let semi = join(JoinType::Semi, predicates, scan_a, scan_b);
    let prop = RelExpr::with_s_expr(&semi).derive_relational_prop()?;
    assert!(prop.output_columns.contains(&x.index));
    assert!(!prop.output_columns.contains(&y.index));
    Ok(())
}

#[test]
fn test_matcher() {
    let (scan_a, x, _) = table_a();
    let filtered = filter(vec![eq(column_ref(&x), int_const(1))], scan_a);

    let matcher = Matcher::MatchOp {
        op_type: RelOp::Filter,
        children: vec![Matcher::MatchOp {
            op_type: RelOp::Scan,
            children: vec![],
        }],
    };
    assert!(matcher.matches(&filtered));

    let mismatched = Matcher::MatchOp {
        op_type: RelOp::Join,
        children: vec![Matcher::Leaf, Matcher::Leaf],
    };
    assert!(!mismatched.matches(&filtered));

    assert!(Matcher::Leaf.matches(&filtered));
}
